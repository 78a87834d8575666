mod answer;
mod ids;
mod interview;
mod leaderboard;
mod question;
mod settings;
mod user;

pub use answer::{Answer, Evaluation, EvaluationError, ScoreBand};
pub use ids::{AnswerId, InterviewId, ParseIdError, QuestionId, SessionId, UserId};
pub use interview::{Interview, InterviewError, InterviewStatus};
pub use leaderboard::{CategoryScore, LeaderboardEntry, PerformanceHistory, ScorePoint};
pub use question::{Difficulty, Question, QuestionError};
pub use settings::{SessionSettings, SettingsError};
pub use user::{User, UserError, normalize_email};
