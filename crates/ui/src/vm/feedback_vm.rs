use prep_core::model::ScoreBand;
use serde::Serialize;
use services::{FeedbackItem, FeedbackReport};

use crate::vm::interview_vm::difficulty_label;
use crate::vm::time_fmt::format_date;

/// Colour family for a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScoreTone {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTone {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match ScoreBand::from_score(score) {
            ScoreBand::Excellent => Self::Excellent,
            ScoreBand::Good => Self::Good,
            ScoreBand::Fair => Self::Fair,
            ScoreBand::NeedsWork => Self::Poor,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackCardVm {
    pub heading: String,
    pub question: String,
    pub category: String,
    pub difficulty: &'static str,
    pub answer: String,
    pub score: Option<u32>,
    pub tone: Option<ScoreTone>,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub copy_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackPageVm {
    pub title: String,
    pub date: String,
    pub overall_score: Option<u32>,
    pub overall_tone: Option<ScoreTone>,
    pub cards: Vec<FeedbackCardVm>,
}

fn card(position: usize, item: &FeedbackItem) -> FeedbackCardVm {
    let evaluation = item.evaluation();
    let score = evaluation.map(|e| e.score());
    FeedbackCardVm {
        heading: format!("Question {position}"),
        question: item
            .question
            .as_ref()
            .map_or_else(String::new, |q| q.text().to_owned()),
        category: item
            .question
            .as_ref()
            .map_or_else(String::new, |q| q.category().to_owned()),
        difficulty: item
            .question
            .as_ref()
            .map_or("", |q| difficulty_label(q.difficulty())),
        answer: item.answer.text().to_owned(),
        score,
        tone: score.map(ScoreTone::from_score),
        feedback: evaluation.map_or_else(String::new, |e| e.feedback().to_owned()),
        strengths: evaluation.map_or_else(Vec::new, |e| e.strengths().to_vec()),
        improvements: evaluation.map_or_else(Vec::new, |e| e.improvements().to_vec()),
        copy_text: item.to_plain_text(),
    }
}

#[must_use]
pub fn map_feedback_report(report: &FeedbackReport) -> FeedbackPageVm {
    let overall_score = report.overall_score();
    FeedbackPageVm {
        title: report.interview.title().to_owned(),
        date: format_date(report.interview.date()),
        overall_score,
        overall_tone: overall_score.map(ScoreTone::from_score),
        cards: report
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| card(i + 1, item))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::InterviewId;
    use std::sync::Arc;

    #[test]
    fn tones_follow_bands() {
        assert_eq!(ScoreTone::from_score(92), ScoreTone::Excellent);
        assert_eq!(ScoreTone::from_score(85), ScoreTone::Good);
        assert_eq!(ScoreTone::from_score(55), ScoreTone::Fair);
        assert_eq!(ScoreTone::from_score(10), ScoreTone::Poor);
    }

    #[tokio::test]
    async fn sample_report_maps_to_cards() {
        let store = storage::Storage::seeded().unwrap();
        let service = services::FeedbackService::new(
            Arc::clone(&store.interviews),
            Arc::clone(&store.answers),
            Arc::clone(&store.questions),
        );
        let report = service.report(InterviewId::new(1)).await.unwrap();
        let page = map_feedback_report(&report);

        assert_eq!(page.title, "Software Engineering Interview");
        assert_eq!(page.date, "Oct 15, 2023");
        assert_eq!(page.overall_score, Some(89));
        assert_eq!(page.overall_tone, Some(ScoreTone::Good));

        let first = &page.cards[0];
        assert_eq!(first.heading, "Question 1");
        assert_eq!(first.category, "Problem Solving");
        assert_eq!(first.tone, Some(ScoreTone::Excellent));
        assert_eq!(first.strengths.len(), 4);
        assert!(first.copy_text.starts_with("Question: Describe a challenging problem"));
    }
}
