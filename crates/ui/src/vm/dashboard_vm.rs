use prep_core::model::InterviewStatus;
use serde::Serialize;
use services::{DashboardOverview, InterviewAction, ProgressStats, RecentInterview};

use crate::routes::Route;
use crate::vm::time_fmt::{format_date, format_minutes};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatCardVm {
    pub title: &'static str,
    pub value: String,
    /// Signed change, e.g. "+4%"; empty when there is nothing to compare.
    pub change: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecentInterviewVm {
    pub title: String,
    pub date: String,
    pub status: &'static str,
    pub score: Option<u32>,
    pub duration: String,
    pub action: &'static str,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardVm {
    pub stats: Vec<StatCardVm>,
    pub recent: Vec<RecentInterviewVm>,
}

fn signed(delta: Option<i64>, suffix: &str) -> String {
    match delta {
        Some(d) if d >= 0 => format!("+{d}{suffix}"),
        Some(d) => format!("{d}{suffix}"),
        None => String::new(),
    }
}

fn status_label(status: InterviewStatus) -> &'static str {
    match status {
        InterviewStatus::Completed => "Completed",
        InterviewStatus::Scheduled => "Scheduled",
        InterviewStatus::InProgress => "In Progress",
    }
}

fn stat_cards(stats: &ProgressStats) -> Vec<StatCardVm> {
    let best = stats.best_category.as_ref();
    vec![
        StatCardVm {
            title: "Overall Score",
            value: stats
                .overall_score
                .map_or_else(|| "-".to_owned(), |s| format!("{s}%")),
            change: signed(stats.score_change, "%"),
            description: "since last interview".to_owned(),
        },
        StatCardVm {
            title: "Interviews Completed",
            value: stats.interviews_completed.to_string(),
            change: String::new(),
            description: "all time".to_owned(),
        },
        StatCardVm {
            title: "Progress Rate",
            value: signed(stats.improvement, "%"),
            change: String::new(),
            description: "since first interview".to_owned(),
        },
        StatCardVm {
            title: "Best Category",
            value: best.map_or_else(|| "-".to_owned(), |c| c.name.clone()),
            change: String::new(),
            description: best.map_or_else(String::new, |c| format!("{}% score", c.score)),
        },
    ]
}

impl From<&RecentInterview> for RecentInterviewVm {
    fn from(recent: &RecentInterview) -> Self {
        let interview = &recent.interview;
        let target = match recent.action {
            InterviewAction::ViewResults => Route::FeedbackFor(interview.id()),
            InterviewAction::Continue | InterviewAction::Start => Route::Interview,
        };
        Self {
            title: interview.title().to_owned(),
            date: format_date(interview.date()),
            status: status_label(interview.status()),
            score: interview.score(),
            duration: format_minutes(interview.duration_minutes()),
            action: recent.action.label(),
            target: target.path(),
        }
    }
}

#[must_use]
pub fn map_dashboard(overview: &DashboardOverview) -> DashboardVm {
    DashboardVm {
        stats: stat_cards(&overview.stats),
        recent: overview.recent.iter().map(RecentInterviewVm::from).collect(),
    }
}
