//! Async driver around `SessionState`.
//!
//! One tokio task owns the state for the whole session and applies commands,
//! countdown ticks, evaluation results and the review pause one at a time.
//! Callers talk to it through `SessionController` and observe it through
//! `watch` snapshots. Ending the task (exit, completion, or dropping the
//! handle) drops the pending evaluation and timers with it.

use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{Instrument, debug, info, info_span, trace, warn};

use prep_core::model::{Evaluation, EvaluationError, Question, QuestionId, SessionId, SessionSettings};
use prep_core::{Advance, Clock, SessionPhase, SessionState, Tick};

use super::evaluator::AnswerEvaluator;
use crate::error::SessionError;

const TICK: Duration = Duration::from_secs(1);

/// Invoked once, after the last question's review pause has elapsed.
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

type EvaluationFuture = Pin<Box<dyn Future<Output = Result<Evaluation, EvaluationError>> + Send>>;

//
// ─── PUBLIC TYPES ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Completed,
    Exited,
}

/// Everything a front end needs to render the session at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub index: usize,
    pub total: usize,
    pub question: Question,
    pub remaining_secs: u32,
    pub budget_secs: u32,
    pub draft: String,
    pub phase: SessionPhase,
    pub status: SessionStatus,
    pub answered: usize,
    /// Evaluation of the current question once it is `Submitted`.
    pub last_evaluation: Option<Evaluation>,
    pub exit_requires_confirmation: bool,
}

impl SessionSnapshot {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_active() && self.phase == SessionPhase::Answering && !self.draft.trim().is_empty()
    }
}

/// One handed-in answer with whatever the evaluator said about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub text: String,
    pub elapsed_secs: u32,
    /// `None` when the evaluator failed.
    pub evaluation: Option<Evaluation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub answers: Vec<SubmittedAnswer>,
}

impl CompletedSession {
    #[must_use]
    pub fn total_elapsed_secs(&self) -> u32 {
        self.answers.iter().map(|a| a.elapsed_secs).sum()
    }

    /// Rounded mean of the evaluated answers, `None` if none were evaluated.
    #[must_use]
    pub fn average_score(&self) -> Option<u32> {
        let scores: Vec<u32> = self
            .answers
            .iter()
            .filter_map(|a| a.evaluation.as_ref().map(Evaluation::score))
            .collect();
        if scores.is_empty() {
            return None;
        }
        let total: u32 = scores.iter().sum();
        let count = u32::try_from(scores.len()).ok()?;
        Some((total + count / 2) / count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(CompletedSession),
    /// Left early; nothing from the session is kept.
    Exited { answered: usize },
}

#[derive(Debug)]
enum Command {
    UpdateDraft(String),
    Submit,
    Exit,
}

//
// ─── HANDLE ────────────────────────────────────────────────────────────────────
//

/// Handle to a running interview session.
///
/// Commands sent after the session has ended are silently dropped.
pub struct SessionController {
    id: SessionId,
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
    task: JoinHandle<SessionOutcome>,
}

impl SessionController {
    /// Start a session on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` if `questions` is empty.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(
        questions: Vec<Question>,
        settings: &SessionSettings,
        evaluator: Arc<dyn AnswerEvaluator>,
        clock: Clock,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> Result<Self, SessionError> {
        let state = SessionState::new(questions.len(), settings.question_time_budget_secs())?;
        let id = SessionId::new_random();

        let task = SessionTask {
            id,
            questions,
            state,
            evaluator,
            review_pause: settings.review_pause(),
            clock,
            started_at: clock.now(),
            answers: Vec::new(),
            last_evaluation: None,
            status: SessionStatus::Active,
            on_complete: Some(Box::new(on_complete)),
        };
        let (snapshot_tx, snapshots) = watch::channel(task.snapshot());
        let (commands, command_rx) = mpsc::unbounded_channel();

        let span = info_span!("interview_session", session_id = %id);
        let task = tokio::spawn(task.run(command_rx, snapshot_tx).instrument(span));

        Ok(Self {
            id,
            commands,
            snapshots,
            task,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Replace the answer draft. Ignored unless the current question is `Answering`.
    pub fn update_draft(&self, text: impl Into<String>) {
        let _ = self.commands.send(Command::UpdateDraft(text.into()));
    }

    /// Hand in the current draft. Ignored for a blank draft or outside `Answering`.
    pub fn submit(&self) {
        let _ = self.commands.send(Command::Submit);
    }

    /// Latest published state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Whether leaving now would throw away progress. The front end asks the
    /// candidate before calling `exit` when this is true.
    #[must_use]
    pub fn exit_requires_confirmation(&self) -> bool {
        self.snapshots.borrow().exit_requires_confirmation
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the session and discard it. A session that already completed
    /// still reports `SessionOutcome::Completed`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Aborted` if the session task panicked.
    pub async fn exit(self) -> Result<SessionOutcome, SessionError> {
        let _ = self.commands.send(Command::Exit);
        self.join().await
    }

    /// Wait for the session to end on its own.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Aborted` if the session task panicked.
    pub async fn finish(self) -> Result<SessionOutcome, SessionError> {
        self.join().await
    }

    // The command sender stays alive until the task has ended.
    async fn join(self) -> Result<SessionOutcome, SessionError> {
        self.task
            .await
            .map_err(|e| SessionError::Aborted(e.to_string()))
    }
}

//
// ─── TASK ──────────────────────────────────────────────────────────────────────
//

struct SessionTask {
    id: SessionId,
    questions: Vec<Question>,
    state: SessionState,
    evaluator: Arc<dyn AnswerEvaluator>,
    review_pause: Duration,
    clock: Clock,
    started_at: DateTime<Utc>,
    answers: Vec<SubmittedAnswer>,
    last_evaluation: Option<Evaluation>,
    status: SessionStatus,
    on_complete: Option<CompletionCallback>,
}

impl SessionTask {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        snapshots: watch::Sender<SessionSnapshot>,
    ) -> SessionOutcome {
        info!(questions = self.questions.len(), "interview session started");

        let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut evaluation: Option<EvaluationFuture> = None;
        let review = time::sleep(Duration::ZERO);
        tokio::pin!(review);
        let mut reviewing = false;

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(Command::UpdateDraft(text)) => {
                        if self.state.update_draft(text) {
                            snapshots.send_replace(self.snapshot());
                        }
                    }
                    Some(Command::Submit) => {
                        if let Some(answer) = self.state.submit() {
                            info!(
                                question = self.state.index() + 1,
                                elapsed_secs = self.state.elapsed_secs(),
                                "answer submitted"
                            );
                            evaluation = Some(self.evaluate(answer));
                            snapshots.send_replace(self.snapshot());
                        } else {
                            debug!(phase = ?self.state.phase(), "submit ignored");
                        }
                    }
                    Some(Command::Exit) | None => {
                        return self.exit(&snapshots);
                    }
                },

                Some(result) = next_evaluation(&mut evaluation), if evaluation.is_some() => {
                    evaluation = None;
                    self.record_evaluation(result);
                    review.as_mut().reset(Instant::now() + self.review_pause);
                    reviewing = true;
                    snapshots.send_replace(self.snapshot());
                }

                () = &mut review, if reviewing => {
                    reviewing = false;
                    match self.state.advance() {
                        Advance::Next(index) => {
                            debug!(question = index + 1, "next question");
                            self.last_evaluation = None;
                            ticker.reset();
                            snapshots.send_replace(self.snapshot());
                        }
                        Advance::Completed => return self.complete(&snapshots),
                        Advance::Ignored => {}
                    }
                }

                _ = ticker.tick(), if self.state.is_counting_down() => {
                    match self.state.tick() {
                        Tick::Counted(remaining) => {
                            trace!(remaining, "tick");
                            snapshots.send_replace(self.snapshot());
                        }
                        Tick::Expired => {
                            info!(question = self.state.index() + 1, "time is up");
                            snapshots.send_replace(self.snapshot());
                        }
                        Tick::Idle => {}
                    }
                }
            }
        }
    }

    fn current_question(&self) -> &Question {
        // SessionState keeps the index below the question count.
        &self.questions[self.state.index()]
    }

    fn evaluate(&self, answer: String) -> EvaluationFuture {
        let evaluator = Arc::clone(&self.evaluator);
        let question = self.current_question().clone();
        Box::pin(async move { evaluator.evaluate(&question, &answer).await })
    }

    fn record_evaluation(&mut self, result: Result<Evaluation, EvaluationError>) {
        let evaluation = match result {
            Ok(evaluation) => {
                debug!(score = evaluation.score(), "answer evaluated");
                Some(evaluation)
            }
            Err(error) => {
                warn!(%error, "answer evaluation failed");
                None
            }
        };
        self.answers.push(SubmittedAnswer {
            question_id: self.current_question().id(),
            text: self.state.draft().to_owned(),
            elapsed_secs: self.state.elapsed_secs(),
            evaluation: evaluation.clone(),
        });
        self.last_evaluation = evaluation;
        self.state.finish_evaluation();
    }

    fn complete(mut self, snapshots: &watch::Sender<SessionSnapshot>) -> SessionOutcome {
        self.status = SessionStatus::Completed;
        snapshots.send_replace(self.snapshot());
        info!(answers = self.answers.len(), "interview session completed");

        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }

        SessionOutcome::Completed(CompletedSession {
            session_id: self.id,
            started_at: self.started_at,
            completed_at: self.clock.now(),
            answers: self.answers,
        })
    }

    fn exit(mut self, snapshots: &watch::Sender<SessionSnapshot>) -> SessionOutcome {
        let answered = self.answers.len();
        self.status = SessionStatus::Exited;
        snapshots.send_replace(self.snapshot());
        info!(answered, "interview session exited");
        SessionOutcome::Exited { answered }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            index: self.state.index(),
            total: self.state.question_count(),
            question: self.current_question().clone(),
            remaining_secs: self.state.remaining_secs(),
            budget_secs: self.state.budget_secs(),
            draft: self.state.draft().to_owned(),
            phase: self.state.phase(),
            status: self.status,
            answered: self.state.answered(),
            last_evaluation: self.last_evaluation.clone(),
            exit_requires_confirmation: self.status == SessionStatus::Active
                && self.state.exit_requires_confirmation(),
        }
    }
}

async fn next_evaluation(
    pending: &mut Option<EvaluationFuture>,
) -> Option<Result<Evaluation, EvaluationError>> {
    match pending {
        Some(future) => Some(future.await),
        None => None,
    }
}
