use prep_core::SessionPhase;
use prep_core::model::Difficulty;
use serde::Serialize;
use services::{SessionProgress, SessionSnapshot, SessionStatus};

use crate::vm::time_fmt::format_countdown;

/// How loudly the countdown should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TimerUrgency {
    Normal,
    /// Under 30 seconds left.
    Warning,
    /// 10 seconds or less.
    Critical,
}

impl TimerUrgency {
    #[must_use]
    pub fn from_remaining(seconds: u32) -> Self {
        match seconds {
            0..=10 => Self::Critical,
            11..=29 => Self::Warning,
            _ => Self::Normal,
        }
    }
}

/// Caption under the draft: a live word count, or a nudge while it is empty.
#[must_use]
pub fn word_caption(word_count: usize) -> String {
    match word_count {
        0 => "Aim for a complete, detailed response".to_owned(),
        1 => "1 word".to_owned(),
        n => format!("{n} words"),
    }
}

#[must_use]
pub fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::Hard => "Hard",
    }
}

/// Render-ready view of a live interview session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InterviewVm {
    pub badge: String,
    pub question: String,
    pub category: String,
    pub difficulty: &'static str,
    pub timer: String,
    pub urgency: TimerUrgency,
    pub time_is_up: bool,
    pub draft: String,
    pub word_count: usize,
    pub word_caption: String,
    pub can_edit: bool,
    pub can_submit: bool,
    pub submit_label: &'static str,
    pub progress_percent: u32,
    pub evaluation_score: Option<u32>,
    pub evaluation_feedback: Option<String>,
    pub is_complete: bool,
}

impl From<&SessionSnapshot> for InterviewVm {
    fn from(snapshot: &SessionSnapshot) -> Self {
        let active = snapshot.status == SessionStatus::Active;
        let submit_label = match snapshot.phase {
            SessionPhase::Answering => "Submit Answer",
            SessionPhase::Submitting => "Processing...",
            SessionPhase::Submitted => "Submitted",
        };
        let word_count = snapshot.draft.split_whitespace().count();
        Self {
            badge: format!("Question {}/{}", snapshot.index + 1, snapshot.total),
            question: snapshot.question.text().to_owned(),
            category: snapshot.question.category().to_owned(),
            difficulty: difficulty_label(snapshot.question.difficulty()),
            timer: format_countdown(snapshot.remaining_secs),
            urgency: TimerUrgency::from_remaining(snapshot.remaining_secs),
            time_is_up: snapshot.remaining_secs == 0,
            draft: snapshot.draft.clone(),
            word_count,
            word_caption: word_caption(word_count),
            can_edit: active && snapshot.phase == SessionPhase::Answering,
            can_submit: snapshot.can_submit(),
            submit_label,
            progress_percent: SessionProgress::from(snapshot).percent(),
            evaluation_score: snapshot.last_evaluation.as_ref().map(|e| e.score()),
            evaluation_feedback: snapshot
                .last_evaluation
                .as_ref()
                .map(|e| e.feedback().to_owned()),
            is_complete: snapshot.status == SessionStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{Evaluation, Question, QuestionId, SessionId};

    fn snapshot(remaining_secs: u32, phase: SessionPhase) -> SessionSnapshot {
        SessionSnapshot {
            session_id: SessionId::new_random(),
            index: 1,
            total: 5,
            question: Question::new(
                QuestionId::new(2),
                "How do you handle conflicts within a team?",
                "Teamwork",
                Difficulty::Medium,
            )
            .unwrap(),
            remaining_secs,
            budget_secs: 120,
            draft: "I listen first".into(),
            phase,
            status: SessionStatus::Active,
            answered: 1,
            last_evaluation: None,
            exit_requires_confirmation: true,
        }
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(TimerUrgency::from_remaining(120), TimerUrgency::Normal);
        assert_eq!(TimerUrgency::from_remaining(30), TimerUrgency::Normal);
        assert_eq!(TimerUrgency::from_remaining(29), TimerUrgency::Warning);
        assert_eq!(TimerUrgency::from_remaining(11), TimerUrgency::Warning);
        assert_eq!(TimerUrgency::from_remaining(10), TimerUrgency::Critical);
        assert_eq!(TimerUrgency::from_remaining(0), TimerUrgency::Critical);
    }

    #[test]
    fn answering_snapshot_renders_badge_and_timer() {
        let vm = InterviewVm::from(&snapshot(95, SessionPhase::Answering));
        assert_eq!(vm.badge, "Question 2/5");
        assert_eq!(vm.timer, "01:35");
        assert_eq!(vm.difficulty, "Medium");
        assert_eq!(vm.submit_label, "Submit Answer");
        assert!(vm.can_edit);
        assert!(vm.can_submit);
        assert_eq!(vm.progress_percent, 20);
    }

    #[test]
    fn submitted_snapshot_shows_evaluation_and_locks_input() {
        let mut snap = snapshot(40, SessionPhase::Submitted);
        snap.answered = 2;
        snap.last_evaluation = Some(Evaluation::new(85, "Good example.", vec![], vec![]).unwrap());
        let vm = InterviewVm::from(&snap);
        assert_eq!(vm.submit_label, "Submitted");
        assert!(!vm.can_edit);
        assert!(!vm.can_submit);
        assert_eq!(vm.evaluation_score, Some(85));
        assert_eq!(vm.evaluation_feedback.as_deref(), Some("Good example."));
    }

    #[test]
    fn draft_caption_counts_words() {
        let mut snap = snapshot(60, SessionPhase::Answering);
        snap.draft = "  I   listen\nfirst ".into();
        let vm = InterviewVm::from(&snap);
        assert_eq!(vm.word_count, 3);
        assert_eq!(vm.word_caption, "3 words");

        snap.draft = "   ".into();
        let vm = InterviewVm::from(&snap);
        assert_eq!(vm.word_count, 0);
        assert_eq!(vm.word_caption, "Aim for a complete, detailed response");
        assert_eq!(word_caption(1), "1 word");
    }
}
