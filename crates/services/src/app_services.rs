use std::sync::Arc;

use prep_core::model::SessionSettings;
use storage::repository::Storage;

use crate::Clock;
use crate::account_service::AccountService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::feedback_service::FeedbackService;
use crate::leaderboard_service::LeaderboardService;
use crate::sessions::{AnswerEvaluator, FixtureEvaluator, InterviewLoopService};

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    settings: SessionSettings,
    interview_loop: Arc<InterviewLoopService>,
    dashboard: Arc<DashboardService>,
    feedback: Arc<FeedbackService>,
    leaderboard: Arc<LeaderboardService>,
    accounts: Arc<AccountService>,
}

impl AppServices {
    /// Build services over storage seeded with the bundled sample data and
    /// a fixture evaluator using the configured latency.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the sample data fails validation.
    pub fn new_seeded(clock: Clock, settings: SessionSettings) -> Result<Self, AppServicesError> {
        let storage = Storage::seeded()?;
        let evaluator: Arc<dyn AnswerEvaluator> =
            Arc::new(FixtureEvaluator::from_fixtures(settings.evaluation_latency())?);
        Ok(Self::new(&storage, clock, settings, evaluator))
    }

    #[must_use]
    pub fn new(
        storage: &Storage,
        clock: Clock,
        settings: SessionSettings,
        evaluator: Arc<dyn AnswerEvaluator>,
    ) -> Self {
        let interview_loop = Arc::new(InterviewLoopService::new(
            clock,
            settings.clone(),
            Arc::clone(&storage.questions),
            Arc::clone(&storage.interviews),
            Arc::clone(&storage.answers),
            evaluator,
        ));
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&storage.interviews),
            Arc::clone(&storage.performance),
        ));
        let feedback = Arc::new(FeedbackService::new(
            Arc::clone(&storage.interviews),
            Arc::clone(&storage.answers),
            Arc::clone(&storage.questions),
        ));
        let leaderboard = Arc::new(LeaderboardService::new(Arc::clone(&storage.leaderboard)));
        let accounts = Arc::new(AccountService::new(clock, Arc::clone(&storage.users)));

        Self {
            settings,
            interview_loop,
            dashboard,
            feedback,
            leaderboard,
            accounts,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
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
