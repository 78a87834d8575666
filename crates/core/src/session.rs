//! Pure state machine for one timed interview session.
//!
//! Nothing in here knows about timers or async evaluation: callers feed it
//! discrete events (`tick`, `update_draft`, `submit`, `finish_evaluation`,
//! `advance`) one at a time. Every event that does not fit the current phase
//! is ignored instead of failing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("an interview needs at least one question")]
    NoQuestions,

    #[error("question time budget must be > 0")]
    ZeroBudget,
}

/// Where the current question is in its answer → submit → review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// The draft is editable and the countdown is running.
    Answering,
    /// The answer is frozen while it is being evaluated.
    Submitting,
    /// The evaluation is in; the candidate is reviewing it.
    Submitted,
}

/// Result of a countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One second was taken off; the payload is what is left.
    Counted(u32),
    /// This tick took the countdown to zero.
    Expired,
    /// Nothing changed.
    Idle,
}

/// Result of leaving the `Submitted` phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index.
    Next(usize),
    /// The last question was done; the session is over.
    Completed,
    /// Not in `Submitted`, nothing changed.
    Ignored,
}

/// Only constructible through `new`, which keeps `index < question_count`
/// and `remaining_secs <= budget_secs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    question_count: usize,
    budget_secs: u32,
    index: usize,
    remaining_secs: u32,
    draft: String,
    phase: SessionPhase,
    completed: bool,
}

impl SessionState {
    /// Start at the first question with a full budget and an empty draft.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NoQuestions` for an empty interview and
    /// `SessionStateError::ZeroBudget` for a zero time budget.
    pub fn new(question_count: usize, budget_secs: u32) -> Result<Self, SessionStateError> {
        if question_count == 0 {
            return Err(SessionStateError::NoQuestions);
        }
        if budget_secs == 0 {
            return Err(SessionStateError::ZeroBudget);
        }
        Ok(Self {
            question_count,
            budget_secs,
            index: 0,
            remaining_secs: budget_secs,
            draft: String::new(),
            phase: SessionPhase::Answering,
            completed: false,
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn budget_secs(&self) -> u32 {
        self.budget_secs
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Seconds spent on the current question so far.
    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.budget_secs - self.remaining_secs
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.question_count
    }

    /// Number of questions whose answer has been handed in.
    #[must_use]
    pub fn answered(&self) -> usize {
        match (self.completed, self.phase) {
            (true, _) => self.question_count,
            (false, SessionPhase::Answering) => self.index,
            (false, SessionPhase::Submitting | SessionPhase::Submitted) => self.index + 1,
        }
    }

    /// True while a tick could still change something.
    #[must_use]
    pub fn is_counting_down(&self) -> bool {
        !self.completed && self.phase == SessionPhase::Answering && self.remaining_secs > 0
    }

    /// Take one second off the countdown.
    ///
    /// Reaching zero does not submit anything; the draft stays editable and
    /// can still be submitted.
    pub fn tick(&mut self) -> Tick {
        if !self.is_counting_down() {
            return Tick::Idle;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            Tick::Expired
        } else {
            Tick::Counted(self.remaining_secs)
        }
    }

    /// Replace the draft. Returns false (and changes nothing) outside `Answering`.
    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        if self.completed || self.phase != SessionPhase::Answering {
            return false;
        }
        self.draft = text.into();
        true
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.completed && self.phase == SessionPhase::Answering && !self.draft.trim().is_empty()
    }

    /// Freeze the draft and move to `Submitting`.
    ///
    /// Returns the submitted text, or `None` if the phase is wrong or the
    /// draft is blank.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.phase = SessionPhase::Submitting;
        Some(self.draft.clone())
    }

    /// `Submitting` → `Submitted`. Returns false if not `Submitting`.
    pub fn finish_evaluation(&mut self) -> bool {
        if self.completed || self.phase != SessionPhase::Submitting {
            return false;
        }
        self.phase = SessionPhase::Submitted;
        true
    }

    /// Leave `Submitted`: go to the next question or complete the session.
    ///
    /// The draft is cleared here and nowhere else.
    pub fn advance(&mut self) -> Advance {
        if self.completed || self.phase != SessionPhase::Submitted {
            return Advance::Ignored;
        }
        if self.is_last_question() {
            self.completed = true;
            return Advance::Completed;
        }
        self.index += 1;
        self.remaining_secs = self.budget_secs;
        self.draft.clear();
        self.phase = SessionPhase::Answering;
        Advance::Next(self.index)
    }

    /// Whether leaving now would throw away progress the candidate should confirm losing.
    #[must_use]
    pub fn exit_requires_confirmation(&self) -> bool {
        !self.completed && !(self.index == 0 && self.phase == SessionPhase::Answering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_submit_cycle(state: &mut SessionState) -> Advance {
        assert!(state.submit().is_some());
        assert_eq!(state.phase(), SessionPhase::Submitting);
        assert!(state.finish_evaluation());
        assert_eq!(state.phase(), SessionPhase::Submitted);
        state.advance()
    }

    #[test]
    fn starts_at_first_question_with_full_budget() {
        let state = SessionState::new(2, 120).unwrap();
        assert_eq!(state.index(), 0);
        assert_eq!(state.remaining_secs(), 120);
        assert_eq!(state.phase(), SessionPhase::Answering);
        assert!(state.draft().is_empty());
        assert!(!state.is_completed());
    }

    #[test]
    fn empty_interview_is_rejected() {
        assert_eq!(SessionState::new(0, 120).unwrap_err(), SessionStateError::NoQuestions);
        assert_eq!(SessionState::new(1, 0).unwrap_err(), SessionStateError::ZeroBudget);
    }

    #[test]
    fn two_question_walkthrough() {
        let mut state = SessionState::new(2, 120).unwrap();

        assert!(state.update_draft("hello"));
        assert_eq!(state.draft(), "hello");

        assert_eq!(run_submit_cycle(&mut state), Advance::Next(1));
        assert_eq!(state.index(), 1);
        assert_eq!(state.phase(), SessionPhase::Answering);
        assert_eq!(state.remaining_secs(), 120);
        assert_eq!(state.draft(), "");

        assert!(state.update_draft("second answer"));
        assert_eq!(run_submit_cycle(&mut state), Advance::Completed);
        assert!(state.is_completed());
        assert_eq!(state.index(), 1);
        assert_eq!(state.answered(), 2);
    }

    #[test]
    fn countdown_stops_at_zero_without_submitting() {
        let mut state = SessionState::new(1, 120).unwrap();
        for _ in 0..119 {
            assert!(matches!(state.tick(), Tick::Counted(_)));
        }
        assert_eq!(state.tick(), Tick::Expired);
        assert_eq!(state.remaining_secs(), 0);

        for _ in 0..10 {
            assert_eq!(state.tick(), Tick::Idle);
        }
        assert_eq!(state.remaining_secs(), 0);
        assert_eq!(state.phase(), SessionPhase::Answering);

        // Still answerable after the clock ran out.
        assert!(state.update_draft("late"));
        assert!(state.submit().is_some());
    }

    #[test]
    fn tick_is_ignored_outside_answering() {
        let mut state = SessionState::new(1, 30).unwrap();
        state.update_draft("x");
        state.tick();
        state.submit();
        assert_eq!(state.tick(), Tick::Idle);
        assert_eq!(state.remaining_secs(), 29);
        state.finish_evaluation();
        assert_eq!(state.tick(), Tick::Idle);
        assert_eq!(state.remaining_secs(), 29);
        assert_eq!(state.elapsed_secs(), 1);
    }

    #[test]
    fn blank_draft_cannot_be_submitted() {
        let mut state = SessionState::new(2, 120).unwrap();
        assert!(state.submit().is_none());
        state.update_draft("   \n\t");
        assert!(state.submit().is_none());
        assert_eq!(state.phase(), SessionPhase::Answering);
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn draft_is_frozen_after_submit() {
        let mut state = SessionState::new(2, 120).unwrap();
        state.update_draft("first");
        state.submit();
        assert!(!state.update_draft("changed"));
        assert_eq!(state.draft(), "first");
        state.finish_evaluation();
        assert!(!state.update_draft("changed"));
        assert_eq!(state.draft(), "first");
    }

    #[test]
    fn out_of_order_transitions_are_ignored() {
        let mut state = SessionState::new(2, 120).unwrap();
        assert!(!state.finish_evaluation());
        assert_eq!(state.advance(), Advance::Ignored);

        state.update_draft("a");
        state.submit();
        assert_eq!(state.advance(), Advance::Ignored);
        assert!(state.submit().is_none());
        assert_eq!(state.phase(), SessionPhase::Submitting);
    }

    #[test]
    fn completed_session_ignores_everything() {
        let mut state = SessionState::new(1, 60).unwrap();
        state.update_draft("only");
        assert_eq!(run_submit_cycle(&mut state), Advance::Completed);

        let frozen = state.clone();
        assert_eq!(state.tick(), Tick::Idle);
        assert!(!state.update_draft("more"));
        assert!(state.submit().is_none());
        assert!(!state.finish_evaluation());
        assert_eq!(state.advance(), Advance::Ignored);
        assert_eq!(state, frozen);
    }

    #[test]
    fn index_never_leaves_range() {
        let mut state = SessionState::new(5, 10).unwrap();
        while !state.is_completed() {
            assert!(state.index() < state.question_count());
            state.tick();
            state.update_draft("answer");
            run_submit_cycle(&mut state);
        }
        assert_eq!(state.index(), 4);
    }

    #[test]
    fn exit_confirmation_only_needed_after_progress() {
        let mut state = SessionState::new(2, 120).unwrap();
        assert!(!state.exit_requires_confirmation());
        state.update_draft("draft");
        assert!(!state.exit_requires_confirmation());
        state.submit();
        assert!(state.exit_requires_confirmation());
        state.finish_evaluation();
        state.advance();
        assert!(state.exit_requires_confirmation());
    }

    #[test]
    fn elapsed_stays_within_budget() {
        let mut state = SessionState::new(2, 10).unwrap();
        for _ in 0..25 {
            state.tick();
            assert!(state.remaining_secs() <= state.budget_secs());
            assert_eq!(state.elapsed_secs() + state.remaining_secs(), 10);
        }
        assert_eq!(state.elapsed_secs(), 10);
        state.update_draft("done");
        state.submit();
        state.finish_evaluation();
        assert_eq!(state.advance(), Advance::Next(1));
        assert_eq!(state.elapsed_secs(), 0);
    }
}
