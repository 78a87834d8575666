mod dashboard_vm;
mod feedback_vm;
mod interview_vm;
mod leaderboard_vm;
mod time_fmt;

pub use dashboard_vm::{DashboardVm, RecentInterviewVm, StatCardVm, map_dashboard};
pub use feedback_vm::{FeedbackCardVm, FeedbackPageVm, ScoreTone, map_feedback_report};
pub use interview_vm::{InterviewVm, TimerUrgency, difficulty_label, word_caption};
pub use leaderboard_vm::{LeaderboardRowVm, map_standings, medal_glyph};
pub use time_fmt::{format_countdown, format_date, format_datetime, format_minutes};
