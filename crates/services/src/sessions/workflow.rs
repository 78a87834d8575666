use rand::rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::info;

use prep_core::model::{
    Answer, AnswerId, Interview, InterviewId, InterviewStatus, Question, SessionSettings, UserId,
};
use storage::repository::{AnswerRepository, InterviewRepository, QuestionRepository};

use super::controller::{CompletedSession, SessionController};
use super::evaluator::AnswerEvaluator;
use crate::Clock;
use crate::error::SessionError;

pub const DEFAULT_INTERVIEW_TITLE: &str = "Software Engineering Interview";

/// A finished session as it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedInterview {
    pub interview: Interview,
    pub answers: Vec<Answer>,
}

/// Orchestrates interview start and recording of completed sessions.
#[derive(Clone)]
pub struct InterviewLoopService {
    clock: Clock,
    settings: SessionSettings,
    questions: Arc<dyn QuestionRepository>,
    interviews: Arc<dyn InterviewRepository>,
    answers: Arc<dyn AnswerRepository>,
    evaluator: Arc<dyn AnswerEvaluator>,
    title: String,
}

impl InterviewLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        settings: SessionSettings,
        questions: Arc<dyn QuestionRepository>,
        interviews: Arc<dyn InterviewRepository>,
        answers: Arc<dyn AnswerRepository>,
        evaluator: Arc<dyn AnswerEvaluator>,
    ) -> Self {
        Self {
            clock,
            settings,
            questions,
            interviews,
            answers,
            evaluator,
            title: DEFAULT_INTERVIEW_TITLE.to_owned(),
        }
    }

    /// Title given to recorded interviews.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Question sequence for a new session, shuffled and limited per settings.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the questions cannot be read.
    pub async fn load_questions(&self) -> Result<Vec<Question>, SessionError> {
        let mut questions = self.questions.list_questions().await?;
        if self.settings.shuffle_questions() {
            questions.shuffle(&mut rng());
        }
        if let Some(limit) = self.settings.question_limit() {
            questions.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(questions)
    }

    /// Start a new timed session. `on_complete` runs once when the last
    /// question has been reviewed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if there are no questions or they cannot be read.
    pub async fn start_interview(
        &self,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> Result<SessionController, SessionError> {
        let questions = self.load_questions().await?;
        SessionController::spawn(
            questions,
            &self.settings,
            Arc::clone(&self.evaluator),
            self.clock,
            on_complete,
        )
    }

    /// Store a completed session as a `Completed` interview plus its answers.
    ///
    /// The interview score is the rounded mean of the evaluated answers (0 if
    /// none were evaluated), the duration is rounded up to whole minutes and
    /// the date is the clock's current day.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingAnswered` for an empty session, or
    /// validation and storage errors.
    pub async fn record_completion(
        &self,
        user_id: UserId,
        session: &CompletedSession,
    ) -> Result<RecordedInterview, SessionError> {
        if session.answers.is_empty() {
            return Err(SessionError::NothingAnswered);
        }

        let score = session.average_score().unwrap_or(0);
        let minutes = session.total_elapsed_secs().div_ceil(60);
        let interview = Interview::new(
            InterviewId::new(0),
            user_id,
            self.title.as_str(),
            self.clock.today(),
            InterviewStatus::Completed,
            Some(score),
            Some(minutes),
        )?;
        let interview = self.interviews.insert_interview(interview).await?;

        let mut answers = Vec::with_capacity(session.answers.len());
        for submitted in &session.answers {
            let answer = Answer::new(
                AnswerId::new(0),
                interview.id(),
                submitted.question_id,
                submitted.text.as_str(),
                Some(submitted.elapsed_secs),
                submitted.evaluation.clone(),
            )?;
            answers.push(self.answers.insert_answer(answer).await?);
        }

        info!(
            interview_id = %interview.id(),
            score,
            duration_minutes = minutes,
            "interview recorded"
        );
        Ok(RecordedInterview { interview, answers })
    }
}
