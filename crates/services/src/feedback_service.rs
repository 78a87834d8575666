use std::sync::Arc;

use prep_core::model::{Answer, Evaluation, Interview, InterviewId, Question, UserId};
use storage::repository::{AnswerRepository, InterviewRepository, QuestionRepository, StorageError};

use crate::error::FeedbackError;

/// One answered question with its evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackItem {
    /// `None` if the question is no longer in the bank.
    pub question: Option<Question>,
    pub answer: Answer,
}

impl FeedbackItem {
    #[must_use]
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.answer.evaluation()
    }

    /// Plain-text rendering used by "copy feedback".
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let question = self.question.as_ref().map_or("", Question::text);
        let mut out = format!("Question: {question}\nMy Answer: {}", self.answer.text());
        if let Some(evaluation) = self.evaluation() {
            out.push_str(&format!(
                "\nScore: {}/100\nFeedback: {}\nStrengths: {}\nAreas for Improvement: {}",
                evaluation.score(),
                evaluation.feedback(),
                evaluation.strengths().join(", "),
                evaluation.improvements().join(", "),
            ));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReport {
    pub interview: Interview,
    pub items: Vec<FeedbackItem>,
}

impl FeedbackReport {
    /// Rounded mean of the evaluated answers.
    #[must_use]
    pub fn overall_score(&self) -> Option<u32> {
        let scores: Vec<u32> = self
            .items
            .iter()
            .filter_map(|item| item.evaluation().map(Evaluation::score))
            .collect();
        let count = u32::try_from(scores.len()).ok().filter(|c| *c > 0)?;
        Some((scores.iter().sum::<u32>() + count / 2) / count)
    }
}

/// Assembles feedback reports from stored interviews and answers.
#[derive(Clone)]
pub struct FeedbackService {
    interviews: Arc<dyn InterviewRepository>,
    answers: Arc<dyn AnswerRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl FeedbackService {
    #[must_use]
    pub fn new(
        interviews: Arc<dyn InterviewRepository>,
        answers: Arc<dyn AnswerRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            interviews,
            answers,
            questions,
        }
    }

    /// # Errors
    ///
    /// Returns `FeedbackError::NoAnswers` if nothing was recorded for the
    /// interview, or `FeedbackError::Storage` (including `NotFound`).
    pub async fn report(&self, interview_id: InterviewId) -> Result<FeedbackReport, FeedbackError> {
        let interview = self.interviews.get_interview(interview_id).await?;
        let answers = self.answers.list_answers(interview_id).await?;
        if answers.is_empty() {
            return Err(FeedbackError::NoAnswers(interview_id));
        }

        let mut items = Vec::with_capacity(answers.len());
        for answer in answers {
            let question = match self.questions.get_question(answer.question_id).await {
                Ok(question) => Some(question),
                Err(StorageError::NotFound) => None,
                Err(e) => return Err(e.into()),
            };
            items.push(FeedbackItem { question, answer });
        }
        Ok(FeedbackReport { interview, items })
    }

    /// Report for the user's most recent completed interview that has answers.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError::NoInterviews` if there is none.
    pub async fn latest_report(&self, user_id: UserId) -> Result<FeedbackReport, FeedbackError> {
        let interviews = self.interviews.list_interviews(user_id, usize::MAX).await?;
        for interview in interviews.iter().filter(|i| i.is_completed()) {
            match self.report(interview.id()).await {
                Ok(report) => return Ok(report),
                Err(FeedbackError::NoAnswers(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Err(FeedbackError::NoInterviews)
    }
}
