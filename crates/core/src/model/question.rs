use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question category cannot be empty")]
    EmptyCategory,

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

/// How demanding a question is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuestionError::UnknownDifficulty(s.to_owned())),
        }
    }
}

/// A single interview prompt. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    category: String,
    difficulty: Difficulty,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` or `QuestionError::EmptyCategory` for blank fields.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let text = text.into().trim().to_owned();
        let category = category.into().trim().to_owned();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if category.is_empty() {
            return Err(QuestionError::EmptyCategory);
        }
        Ok(Self {
            id,
            text,
            category,
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        let err = Question::new(QuestionId::new(1), "   ", "Teamwork", Difficulty::Easy).unwrap_err();
        assert_eq!(err, QuestionError::EmptyText);
    }

    #[test]
    fn fields_are_trimmed() {
        let q = Question::new(QuestionId::new(1), " Why? ", " Career ", Difficulty::Hard).unwrap();
        assert_eq!(q.text(), "Why?");
        assert_eq!(q.category(), "Career");
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
