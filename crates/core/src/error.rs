use thiserror::Error;

use crate::model::{EvaluationError, InterviewError, QuestionError, SettingsError, UserError};
use crate::session::SessionStateError;

/// Any validation failure raised by the domain layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Interview(#[from] InterviewError),
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Session(#[from] SessionStateError),
    #[error("invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}
