use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// One ranked row of the global leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub position: u32,
    pub score: u32,
    pub interviews_completed: u32,
    pub best_category: String,
}

/// Average score for one skill category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: u32,
}

/// Overall score recorded on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub score: u32,
}

/// Per-user performance data behind the dashboard charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    pub categories: Vec<CategoryScore>,
    /// Ordered oldest first.
    pub progression: Vec<ScorePoint>,
}

impl PerformanceHistory {
    #[must_use]
    pub fn latest(&self) -> Option<ScorePoint> {
        self.progression.last().copied()
    }

    #[must_use]
    pub fn previous(&self) -> Option<ScorePoint> {
        self.progression.iter().rev().nth(1).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<ScorePoint> {
        self.progression.first().copied()
    }

    /// Category with the highest score; the earliest listed wins ties.
    #[must_use]
    pub fn best_category(&self) -> Option<&CategoryScore> {
        self.categories
            .iter()
            .reduce(|best, next| if next.score > best.score { next } else { best })
    }
}
