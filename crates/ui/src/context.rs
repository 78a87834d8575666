use std::sync::{Arc, RwLock};

use prep_core::model::{SessionSettings, UserId};
use services::{
    AccountService, AppServices, DashboardService, FeedbackService, InterviewLoopService,
    LeaderboardService, UserSession,
};

pub trait UiApp: Send + Sync {
    fn settings(&self) -> SessionSettings;

    fn interview_loop(&self) -> Arc<InterviewLoopService>;
    fn dashboard(&self) -> Arc<DashboardService>;
    fn feedback(&self) -> Arc<FeedbackService>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
    fn accounts(&self) -> Arc<AccountService>;
}

impl UiApp for AppServices {
    fn settings(&self) -> SessionSettings {
        AppServices::settings(self).clone()
    }

    fn interview_loop(&self) -> Arc<InterviewLoopService> {
        AppServices::interview_loop(self)
    }

    fn dashboard(&self) -> Arc<DashboardService> {
        AppServices::dashboard(self)
    }

    fn feedback(&self) -> Arc<FeedbackService> {
        AppServices::feedback(self)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        AppServices::leaderboard(self)
    }

    fn accounts(&self) -> Arc<AccountService> {
        AppServices::accounts(self)
    }
}

/// Services plus the signed-in user, shared by every screen.
#[derive(Clone)]
pub struct AppContext {
    settings: SessionSettings,
    user: Arc<RwLock<Option<UserSession>>>,

    interview_loop: Arc<InterviewLoopService>,
    dashboard: Arc<DashboardService>,
    feedback: Arc<FeedbackService>,
    leaderboard: Arc<LeaderboardService>,
    accounts: Arc<AccountService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            settings: app.settings(),
            user: Arc::new(RwLock::new(None)),
            interview_loop: app.interview_loop(),
            dashboard: app.dashboard(),
            feedback: app.feedback(),
            leaderboard: app.leaderboard(),
            accounts: app.accounts(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Replaces any previous user; only one user is signed in at a time.
    pub fn set_user(&self, session: UserSession) {
        let previous = match self.user.write() {
            Ok(mut slot) => slot.replace(session),
            Err(poisoned) => poisoned.into_inner().replace(session),
        };
        if let Some(previous) = previous {
            self.accounts.sign_out(previous);
        }
    }

    pub fn sign_out(&self) {
        let current = match self.user.write() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(current) = current {
            self.accounts.sign_out(current);
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserSession> {
        match self.user.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn current_user_id(&self) -> Option<UserId> {
        self.current_user().map(|session| session.user_id())
    }

    #[must_use]
    pub fn interview_loop(&self) -> Arc<InterviewLoopService> {
        Arc::clone(&self.interview_loop)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn feedback(&self) -> Arc<FeedbackService> {
        Arc::clone(&self.feedback)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn accounts(&self) -> Arc<AccountService> {
        Arc::clone(&self.accounts)
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
