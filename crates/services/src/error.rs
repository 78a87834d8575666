//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::SessionStateError;
use prep_core::model::{EvaluationError, InterviewError, SettingsError, UserError};
use storage::repository::StorageError;

/// Errors emitted while starting or recording an interview session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has no answers to record")]
    NothingAnswered,
    #[error("session task stopped unexpectedly: {0}")]
    Aborted(String),
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Interview(#[from] InterviewError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `FeedbackService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("interview {0} has no recorded answers")]
    NoAnswers(prep_core::model::InterviewId),
    #[error("no completed interviews yet")]
    NoInterviews,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `LeaderboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LeaderboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AccountService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    #[error("email is required")]
    MissingEmail,
    #[error("password is required")]
    MissingPassword,
    #[error("no account found for {0}")]
    UnknownAccount(String),
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Evaluation(#[from] prep_core::Error),
}
