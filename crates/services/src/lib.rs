#![forbid(unsafe_code)]

pub mod account_service;
pub mod app_services;
pub mod dashboard_service;
pub mod error;
pub mod feedback_service;
pub mod leaderboard_service;
pub mod sessions;

pub use prep_core::Clock;

pub use account_service::{AccountService, RegistrationForm, SignInForm, UserSession};
pub use app_services::AppServices;
pub use dashboard_service::{
    DashboardOverview, DashboardService, InterviewAction, ProgressStats, RecentInterview,
};
pub use error::{
    AccountError, AppServicesError, DashboardError, FeedbackError, LeaderboardError, SessionError,
};
pub use feedback_service::{FeedbackItem, FeedbackReport, FeedbackService};
pub use leaderboard_service::{LeaderboardService, Medal, Standing};
pub use sessions::{
    AnswerEvaluator, CompletedSession, FixtureEvaluator, InterviewLoopService, RecordedInterview,
    SessionController, SessionOutcome, SessionProgress, SessionSnapshot, SessionStatus,
    SubmittedAnswer,
};
