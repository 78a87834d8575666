use std::sync::Arc;

use prep_core::model::{
    CategoryScore, Interview, InterviewStatus, PerformanceHistory, ScorePoint, UserId,
};
use storage::repository::{InterviewRepository, PerformanceRepository};

use crate::error::DashboardError;

/// What the dashboard offers to do with an interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewAction {
    ViewResults,
    Continue,
    Start,
}

impl InterviewAction {
    #[must_use]
    pub fn for_status(status: InterviewStatus) -> Self {
        match status {
            InterviewStatus::Completed => Self::ViewResults,
            InterviewStatus::InProgress => Self::Continue,
            InterviewStatus::Scheduled => Self::Start,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ViewResults => "View Results",
            Self::Continue => "Continue",
            Self::Start => "Start",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentInterview {
    pub interview: Interview,
    pub action: InterviewAction,
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStats {
    /// Latest overall score from the progression.
    pub overall_score: Option<u32>,
    /// Change of the latest score against the one before it.
    pub score_change: Option<i64>,
    pub interviews_completed: usize,
    /// Change of the latest score against the first one recorded.
    pub improvement: Option<i64>,
    pub best_category: Option<CategoryScore>,
}

impl ProgressStats {
    #[must_use]
    pub fn from_history(history: &PerformanceHistory, interviews_completed: usize) -> Self {
        let delta = |from: Option<ScorePoint>| {
            history
                .latest()
                .zip(from)
                .map(|(latest, from)| i64::from(latest.score) - i64::from(from.score))
        };
        Self {
            overall_score: history.latest().map(|p| p.score),
            score_change: delta(history.previous()),
            interviews_completed,
            improvement: delta(history.first()),
            best_category: history.best_category().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOverview {
    pub stats: ProgressStats,
    pub history: PerformanceHistory,
    pub recent: Vec<RecentInterview>,
}

/// Builds the dashboard for one user.
#[derive(Clone)]
pub struct DashboardService {
    interviews: Arc<dyn InterviewRepository>,
    performance: Arc<dyn PerformanceRepository>,
    recent_limit: usize,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        performance: Arc<dyn PerformanceRepository>,
    ) -> Self {
        Self {
            interviews,
            performance,
            recent_limit: 4,
        }
    }

    #[must_use]
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if the data cannot be read.
    pub async fn overview(&self, user_id: UserId) -> Result<DashboardOverview, DashboardError> {
        let history = self.performance.performance(user_id).await?;
        let all = self.interviews.list_interviews(user_id, usize::MAX).await?;
        let completed = all.iter().filter(|i| i.is_completed()).count();

        let recent = all
            .into_iter()
            .take(self.recent_limit)
            .map(|interview| RecentInterview {
                action: InterviewAction::for_status(interview.status()),
                interview,
            })
            .collect();

        Ok(DashboardOverview {
            stats: ProgressStats::from_history(&history, completed),
            history,
            recent,
        })
    }
}
