mod controller;
mod evaluator;
mod progress;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{
    CompletedSession, CompletionCallback, SessionController, SessionOutcome, SessionSnapshot,
    SessionStatus, SubmittedAnswer,
};
pub use evaluator::{AnswerEvaluator, FixtureEvaluator};
pub use progress::SessionProgress;
pub use workflow::{InterviewLoopService, RecordedInterview};
