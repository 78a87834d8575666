use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{InterviewId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InterviewError {
    #[error("interview title cannot be empty")]
    EmptyTitle,

    #[error("interview score must be between 0 and 100, got {0}")]
    ScoreOutOfRange(u32),

    #[error("a completed interview needs a score")]
    MissingScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewStatus {
    Completed,
    Scheduled,
    InProgress,
}

impl InterviewStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
        }
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An interview on a user's timeline: finished, running, or booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    id: InterviewId,
    user_id: UserId,
    title: String,
    date: NaiveDate,
    status: InterviewStatus,
    score: Option<u32>,
    duration_minutes: Option<u32>,
}

impl Interview {
    /// # Errors
    ///
    /// Returns `InterviewError` for a blank title, an out-of-range score, or a
    /// completed interview without a score.
    pub fn new(
        id: InterviewId,
        user_id: UserId,
        title: impl Into<String>,
        date: NaiveDate,
        status: InterviewStatus,
        score: Option<u32>,
        duration_minutes: Option<u32>,
    ) -> Result<Self, InterviewError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(InterviewError::EmptyTitle);
        }
        if let Some(score) = score.filter(|s| *s > 100) {
            return Err(InterviewError::ScoreOutOfRange(score));
        }
        if status == InterviewStatus::Completed && score.is_none() {
            return Err(InterviewError::MissingScore);
        }
        Ok(Self {
            id,
            user_id,
            title,
            date,
            status,
            score,
            duration_minutes,
        })
    }

    /// Returns a copy with a different id. Used when a repository assigns ids.
    #[must_use]
    pub fn with_id(mut self, id: InterviewId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn id(&self) -> InterviewId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    #[must_use]
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == InterviewStatus::Completed
    }
}
