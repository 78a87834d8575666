use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("question time budget must be between 10 and 3600 seconds")]
    InvalidTimeBudget,

    #[error("evaluation latency must be at most 60000 ms")]
    InvalidEvaluationLatency,

    #[error("review pause must be at most 60000 ms")]
    InvalidReviewPause,

    #[error("question limit must be > 0")]
    InvalidQuestionLimit,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

const MAX_DELAY_MS: u64 = 60_000;

/// Knobs for one interview session.
///
/// The two delays model the evaluation call and the pause that lets the
/// candidate read the result before the next question appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    question_time_budget_secs: u32,
    evaluation_latency_ms: u64,
    review_pause_ms: u64,
    question_limit: Option<u32>,
    shuffle_questions: bool,
}

impl Default for SessionSettings {
    /// Two minutes per question, 3 s evaluation, 2 s review, all questions in order.
    fn default() -> Self {
        Self {
            question_time_budget_secs: 120,
            evaluation_latency_ms: 3_000,
            review_pause_ms: 2_000,
            question_limit: None,
            shuffle_questions: false,
        }
    }
}

impl SessionSettings {
    /// # Errors
    ///
    /// Returns `SettingsError` when any value is outside its allowed range.
    pub fn new(
        question_time_budget_secs: u32,
        evaluation_latency_ms: u64,
        review_pause_ms: u64,
        question_limit: Option<u32>,
        shuffle_questions: bool,
    ) -> Result<Self, SettingsError> {
        if !(10..=3_600).contains(&question_time_budget_secs) {
            return Err(SettingsError::InvalidTimeBudget);
        }
        if evaluation_latency_ms > MAX_DELAY_MS {
            return Err(SettingsError::InvalidEvaluationLatency);
        }
        if review_pause_ms > MAX_DELAY_MS {
            return Err(SettingsError::InvalidReviewPause);
        }
        if question_limit == Some(0) {
            return Err(SettingsError::InvalidQuestionLimit);
        }

        Ok(Self {
            question_time_budget_secs,
            evaluation_latency_ms,
            review_pause_ms,
            question_limit,
            shuffle_questions,
        })
    }

    #[must_use]
    pub fn question_time_budget_secs(&self) -> u32 {
        self.question_time_budget_secs
    }

    #[must_use]
    pub fn evaluation_latency(&self) -> Duration {
        Duration::from_millis(self.evaluation_latency_ms)
    }

    #[must_use]
    pub fn review_pause(&self) -> Duration {
        Duration::from_millis(self.review_pause_ms)
    }

    #[must_use]
    pub fn question_limit(&self) -> Option<u32> {
        self.question_limit
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_two_minute_budget() {
        let settings = SessionSettings::default();
        assert_eq!(settings.question_time_budget_secs(), 120);
        assert_eq!(settings.evaluation_latency(), Duration::from_secs(3));
        assert_eq!(settings.review_pause(), Duration::from_secs(2));
        assert_eq!(settings.question_limit(), None);
    }

    #[test]
    fn budget_outside_range_is_rejected() {
        assert_eq!(
            SessionSettings::new(5, 0, 0, None, false).unwrap_err(),
            SettingsError::InvalidTimeBudget
        );
        assert_eq!(
            SessionSettings::new(3_601, 0, 0, None, false).unwrap_err(),
            SettingsError::InvalidTimeBudget
        );
    }

    #[test]
    fn zero_delays_are_allowed() {
        let settings = SessionSettings::new(60, 0, 0, Some(2), true).unwrap();
        assert_eq!(settings.evaluation_latency(), Duration::ZERO);
        assert!(settings.shuffle_questions());
    }

    #[test]
    fn long_delays_and_zero_limit_are_rejected() {
        assert_eq!(
            SessionSettings::new(60, 60_001, 0, None, false).unwrap_err(),
            SettingsError::InvalidEvaluationLatency
        );
        assert_eq!(
            SessionSettings::new(60, 0, 60_001, None, false).unwrap_err(),
            SettingsError::InvalidReviewPause
        );
        assert_eq!(
            SessionSettings::new(60, 0, 0, Some(0), false).unwrap_err(),
            SettingsError::InvalidQuestionLimit
        );
    }
}
