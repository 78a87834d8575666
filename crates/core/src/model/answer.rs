use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{AnswerId, InterviewId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluationError {
    #[error("score must be between 0 and 100, got {0}")]
    ScoreOutOfRange(u32),

    #[error("feedback cannot be empty")]
    EmptyFeedback,

    #[error("answer text cannot be empty")]
    EmptyAnswer,
}

//
// ─── EVALUATION ────────────────────────────────────────────────────────────────
//

/// Coarse grouping of a 0–100 score, used to pick tone and wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::NeedsWork,
        }
    }
}

/// Assessment attached to a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    score: u32,
    feedback: String,
    strengths: Vec<String>,
    improvements: Vec<String>,
}

impl Evaluation {
    /// # Errors
    ///
    /// Returns `EvaluationError::ScoreOutOfRange` for scores above 100 and
    /// `EvaluationError::EmptyFeedback` for blank feedback.
    pub fn new(
        score: u32,
        feedback: impl Into<String>,
        strengths: Vec<String>,
        improvements: Vec<String>,
    ) -> Result<Self, EvaluationError> {
        if score > 100 {
            return Err(EvaluationError::ScoreOutOfRange(score));
        }
        let feedback = feedback.into();
        if feedback.trim().is_empty() {
            return Err(EvaluationError::EmptyFeedback);
        }
        Ok(Self {
            score,
            feedback,
            strengths: strengths.into_iter().filter(|s| !s.trim().is_empty()).collect(),
            improvements: improvements
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect(),
        })
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    #[must_use]
    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }

    #[must_use]
    pub fn improvements(&self) -> &[String] {
        &self.improvements
    }
}

//
// ─── ANSWER ────────────────────────────────────────────────────────────────────
//

/// A recorded answer to one question of an interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub interview_id: InterviewId,
    pub question_id: QuestionId,
    text: String,
    elapsed_secs: Option<u32>,
    evaluation: Option<Evaluation>,
}

impl Answer {
    /// # Errors
    ///
    /// Returns `EvaluationError::EmptyAnswer` when the text is blank.
    pub fn new(
        id: AnswerId,
        interview_id: InterviewId,
        question_id: QuestionId,
        text: impl Into<String>,
        elapsed_secs: Option<u32>,
        evaluation: Option<Evaluation>,
    ) -> Result<Self, EvaluationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(EvaluationError::EmptyAnswer);
        }
        Ok(Self {
            id,
            interview_id,
            question_id,
            text,
            elapsed_secs,
            evaluation,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: AnswerId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> Option<u32> {
        self.elapsed_secs
    }

    #[must_use]
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }
}
