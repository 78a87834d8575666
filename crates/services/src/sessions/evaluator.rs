use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use prep_core::model::{Evaluation, EvaluationError, Question, QuestionId};

/// Scores a submitted answer.
///
/// The session controller awaits this while the question is in the
/// `Submitting` phase; the future is dropped if the session is exited first.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    /// # Errors
    ///
    /// Returns `EvaluationError` if the answer cannot be assessed.
    async fn evaluate(&self, question: &Question, answer: &str)
    -> Result<Evaluation, EvaluationError>;
}

/// Evaluator that hands out canned evaluations after a fixed latency.
#[derive(Debug, Clone)]
pub struct FixtureEvaluator {
    latency: Duration,
    canned: HashMap<QuestionId, Evaluation>,
    fallback: Evaluation,
}

impl FixtureEvaluator {
    #[must_use]
    pub fn new(latency: Duration, fallback: Evaluation) -> Self {
        Self {
            latency,
            canned: HashMap::new(),
            fallback,
        }
    }

    /// Evaluator preloaded with the bundled sample evaluations.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the sample evaluations are malformed.
    pub fn from_fixtures(latency: Duration) -> Result<Self, prep_core::Error> {
        let fallback = storage::fixtures::generic_evaluation()?;
        let canned = storage::fixtures::evaluations()?;
        Ok(Self::new(latency, fallback).with_canned(canned))
    }

    #[must_use]
    pub fn with_canned(mut self, canned: impl IntoIterator<Item = (QuestionId, Evaluation)>) -> Self {
        self.canned.extend(canned);
        self
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl AnswerEvaluator for FixtureEvaluator {
    async fn evaluate(
        &self,
        question: &Question,
        answer: &str,
    ) -> Result<Evaluation, EvaluationError> {
        if answer.trim().is_empty() {
            return Err(EvaluationError::EmptyAnswer);
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self
            .canned
            .get(&question.id())
            .unwrap_or(&self.fallback)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::Difficulty;

    fn question(id: u64) -> Question {
        Question::new(QuestionId::new(id), "Why?", "General", Difficulty::Easy).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn canned_evaluation_arrives_after_latency() {
        let evaluator = FixtureEvaluator::from_fixtures(Duration::from_secs(3)).unwrap();
        let started = tokio::time::Instant::now();
        let evaluation = evaluator.evaluate(&question(1), "answer").await.unwrap();
        assert_eq!(evaluation.score(), 92);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test]
    async fn unknown_question_gets_fallback() {
        let evaluator = FixtureEvaluator::from_fixtures(Duration::ZERO).unwrap();
        let evaluation = evaluator.evaluate(&question(99), "answer").await.unwrap();
        assert_eq!(evaluation.score(), 80);
    }

    #[tokio::test]
    async fn blank_answer_is_refused() {
        let evaluator = FixtureEvaluator::from_fixtures(Duration::ZERO).unwrap();
        let err = evaluator.evaluate(&question(1), "  ").await.unwrap_err();
        assert_eq!(err, EvaluationError::EmptyAnswer);
    }
}
