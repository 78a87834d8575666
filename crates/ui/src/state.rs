use services::{AccountError, DashboardError, FeedbackError, LeaderboardError, SessionError};

/// What a screen shows when loading its data failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound,
    EmptyInterview,
    NoResults,
    InvalidCredentials,
    EmailTaken,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NotFound => "We couldn't find what you were looking for.",
            Self::EmptyInterview => "There are no questions available for an interview.",
            Self::NoResults => "Complete an interview to see your feedback here.",
            Self::InvalidCredentials => "Check your email and password and try again.",
            Self::EmailTaken => "An account with this email already exists.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::State(_) | SessionError::NothingAnswered => Self::EmptyInterview,
            _ => Self::Unknown,
        }
    }
}

impl From<&FeedbackError> for ViewError {
    fn from(err: &FeedbackError) -> Self {
        match err {
            FeedbackError::NoAnswers(_) | FeedbackError::NoInterviews => Self::NoResults,
            FeedbackError::Storage(storage::StorageError::NotFound) => Self::NotFound,
            _ => Self::Unknown,
        }
    }
}

impl From<&AccountError> for ViewError {
    fn from(err: &AccountError) -> Self {
        match err {
            AccountError::EmailTaken => Self::EmailTaken,
            AccountError::MissingEmail
            | AccountError::MissingPassword
            | AccountError::UnknownAccount(_)
            | AccountError::User(_) => Self::InvalidCredentials,
            _ => Self::Unknown,
        }
    }
}

impl From<&DashboardError> for ViewError {
    fn from(_: &DashboardError) -> Self {
        Self::Unknown
    }
}

impl From<&LeaderboardError> for ViewError {
    fn from(_: &LeaderboardError) -> Self {
        Self::Unknown
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    /// Collapse a load result into a state, mapping the error for display.
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        for<'a> ViewError: From<&'a E>,
    {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(ViewError::from(&err)),
        }
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}
