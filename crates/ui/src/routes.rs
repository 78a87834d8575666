use prep_core::model::InterviewId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no screen at {0}")]
pub struct ParseRouteError(String);

/// Every screen of the app, addressable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Interview,
    /// Feedback for the latest interview.
    Feedback,
    FeedbackFor(InterviewId),
    Leaderboard,
}

impl Route {
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Interview => "/interview".to_owned(),
            Self::Feedback => "/feedback".to_owned(),
            Self::FeedbackFor(id) => format!("/feedback/{id}"),
            Self::Leaderboard => "/leaderboard".to_owned(),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Sign In",
            Self::Register => "Create Account",
            Self::Dashboard => "Dashboard",
            Self::Interview => "Interview",
            Self::Feedback | Self::FeedbackFor(_) => "Feedback",
            Self::Leaderboard => "Leaderboard",
        }
    }

    /// Screens reachable from the navigation bar.
    #[must_use]
    pub fn nav_items() -> [Self; 4] {
        [Self::Dashboard, Self::Interview, Self::Feedback, Self::Leaderboard]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = ParseRouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let path = trimmed.trim_end_matches('/');
        let route = match path {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/interview" => Self::Interview,
            "/feedback" => Self::Feedback,
            "/leaderboard" => Self::Leaderboard,
            other => other
                .strip_prefix("/feedback/")
                .and_then(|id| id.parse().ok())
                .map(Self::FeedbackFor)
                .ok_or_else(|| ParseRouteError(trimmed.to_owned()))?,
        };
        Ok(route)
    }
}
