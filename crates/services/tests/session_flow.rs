use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

use prep_core::SessionPhase;
use prep_core::model::{
    Difficulty, Evaluation, EvaluationError, Question, QuestionId, SessionSettings,
};
use prep_core::time::fixed_clock;
use services::{
    AnswerEvaluator, FixtureEvaluator, SessionController, SessionOutcome, SessionSnapshot,
    SessionStatus,
};

fn questions(n: u64) -> Vec<Question> {
    (1..=n)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("Question number {id}?"),
                "General",
                Difficulty::Medium,
            )
            .unwrap()
        })
        .collect()
}

fn settings() -> SessionSettings {
    SessionSettings::new(120, 3_000, 2_000, None, false).unwrap()
}

fn fixture_evaluator() -> Arc<dyn AnswerEvaluator> {
    let fallback = Evaluation::new(75, "Fine answer.", vec!["Clear".into()], vec![]).unwrap();
    Arc::new(FixtureEvaluator::new(Duration::from_secs(3), fallback))
}

/// Counts evaluations that ran to completion.
struct CountingEvaluator {
    finished: Arc<AtomicUsize>,
}

#[async_trait]
impl AnswerEvaluator for CountingEvaluator {
    async fn evaluate(
        &self,
        _question: &Question,
        _answer: &str,
    ) -> Result<Evaluation, EvaluationError> {
        sleep(Duration::from_secs(3)).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Evaluation::new(80, "Counted.", vec![], vec![])
    }
}

struct FailingEvaluator;

#[async_trait]
impl AnswerEvaluator for FailingEvaluator {
    async fn evaluate(
        &self,
        _question: &Question,
        _answer: &str,
    ) -> Result<Evaluation, EvaluationError> {
        Err(EvaluationError::EmptyFeedback)
    }
}

fn spawn_counted(
    n: u64,
    evaluator: Arc<dyn AnswerEvaluator>,
) -> (SessionController, Arc<AtomicUsize>) {
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completions);
    let controller = SessionController::spawn(
        questions(n),
        &settings(),
        evaluator,
        fixed_clock(),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    )
    .unwrap();
    (controller, completions)
}

async fn wait_until(
    rx: &mut watch::Receiver<SessionSnapshot>,
    condition: impl FnMut(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    rx.wait_for(condition).await.expect("session ended early").clone()
}

#[tokio::test(start_paused = true)]
async fn two_question_walkthrough_completes_once() {
    let (controller, completions) = spawn_counted(2, fixture_evaluator());
    let mut rx = controller.subscribe();

    let start = controller.snapshot();
    assert_eq!(start.index, 0);
    assert_eq!(start.phase, SessionPhase::Answering);
    assert_eq!(start.remaining_secs, 120);

    controller.update_draft("hello");
    controller.submit();
    let submitting = wait_until(&mut rx, |s| s.phase == SessionPhase::Submitting).await;
    assert_eq!(submitting.draft, "hello");

    let submitted = wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;
    assert_eq!(submitted.index, 0);
    assert_eq!(submitted.last_evaluation.map(|e| e.score()), Some(75));

    let second = wait_until(&mut rx, |s| s.index == 1).await;
    assert_eq!(second.phase, SessionPhase::Answering);
    assert_eq!(second.remaining_secs, 120);
    assert_eq!(second.draft, "");
    assert!(second.last_evaluation.is_none());
    assert_eq!(completions.load(Ordering::SeqCst), 0);

    controller.update_draft("second answer");
    controller.submit();
    wait_until(&mut rx, |s| s.phase == SessionPhase::Submitting).await;
    wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;

    let outcome = controller.finish().await.unwrap();
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let final_snapshot = rx.borrow().clone();
    assert_eq!(final_snapshot.status, SessionStatus::Completed);
    assert_eq!(final_snapshot.index, 1);

    let SessionOutcome::Completed(session) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    let texts: Vec<&str> = session.answers.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(texts, ["hello", "second answer"]);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn countdown_holds_at_zero_without_submitting() {
    let (controller, completions) = spawn_counted(1, fixture_evaluator());

    sleep(Duration::from_millis(60_500)).await;
    assert_eq!(controller.snapshot().remaining_secs, 60);

    sleep(Duration::from_secs(200)).await;
    let held = controller.snapshot();
    assert_eq!(held.remaining_secs, 0);
    assert_eq!(held.phase, SessionPhase::Answering);
    assert_eq!(held.index, 0);
    assert_eq!(completions.load(Ordering::SeqCst), 0);

    // Still answerable once the clock has run out.
    let mut rx = controller.subscribe();
    controller.update_draft("late answer");
    controller.submit();
    let submitted = wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;
    assert_eq!(submitted.remaining_secs, 0);

    assert!(matches!(
        controller.finish().await.unwrap(),
        SessionOutcome::Completed(_)
    ));
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn blank_submit_changes_nothing() {
    let (controller, _) = spawn_counted(2, fixture_evaluator());

    controller.submit();
    controller.update_draft("   \n\t ");
    controller.submit();
    sleep(Duration::from_millis(1_500)).await;

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Answering);
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.remaining_secs, 119);
    assert!(!snapshot.can_submit());

    assert!(matches!(
        controller.exit().await.unwrap(),
        SessionOutcome::Exited { answered: 0 }
    ));
}

#[tokio::test(start_paused = true)]
async fn exit_while_submitting_cancels_pending_work() {
    let finished = Arc::new(AtomicUsize::new(0));
    let evaluator = Arc::new(CountingEvaluator {
        finished: Arc::clone(&finished),
    });
    let (controller, completions) = spawn_counted(1, evaluator);
    let mut rx = controller.subscribe();

    controller.update_draft("half-way");
    controller.submit();
    wait_until(&mut rx, |s| s.phase == SessionPhase::Submitting).await;
    assert!(controller.exit_requires_confirmation());

    let outcome = controller.exit().await.unwrap();
    assert_eq!(outcome, SessionOutcome::Exited { answered: 0 });

    let at_exit = rx.borrow().clone();
    assert_eq!(at_exit.status, SessionStatus::Exited);
    assert_eq!(at_exit.phase, SessionPhase::Submitting);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(finished.load(Ordering::SeqCst), 0);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
    assert_eq!(*rx.borrow(), at_exit);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_ends_the_session() {
    let finished = Arc::new(AtomicUsize::new(0));
    let evaluator = Arc::new(CountingEvaluator {
        finished: Arc::clone(&finished),
    });
    let (controller, completions) = spawn_counted(1, evaluator);
    let mut rx = controller.subscribe();

    controller.update_draft("answer");
    controller.submit();
    wait_until(&mut rx, |s| s.phase == SessionPhase::Submitting).await;
    drop(controller);

    let last = wait_until(&mut rx, |s| s.status == SessionStatus::Exited).await;
    assert_eq!(last.phase, SessionPhase::Submitting);
    sleep(Duration::from_secs(30)).await;
    assert_eq!(finished.load(Ordering::SeqCst), 0);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn exit_during_review_pause_stays_on_the_first_question() {
    let (controller, completions) = spawn_counted(2, fixture_evaluator());
    let mut rx = controller.subscribe();

    controller.update_draft("first answer");
    controller.submit();
    let submitted = wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;
    assert_eq!(submitted.index, 0);
    assert!(controller.exit_requires_confirmation());

    let outcome = controller.exit().await.unwrap();
    assert_eq!(outcome, SessionOutcome::Exited { answered: 1 });

    let at_exit = rx.borrow().clone();
    assert_eq!(at_exit.status, SessionStatus::Exited);
    assert_eq!(at_exit.phase, SessionPhase::Submitted);
    assert_eq!(at_exit.index, 0);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(*rx.borrow(), at_exit);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_during_review_pause_ends_the_session() {
    let (controller, completions) = spawn_counted(2, fixture_evaluator());
    let mut rx = controller.subscribe();

    controller.update_draft("first answer");
    controller.submit();
    wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;
    drop(controller);

    let last = wait_until(&mut rx, |s| s.status == SessionStatus::Exited).await;
    assert_eq!(last.phase, SessionPhase::Submitted);
    assert_eq!(last.index, 0);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(*rx.borrow(), last);
    assert_eq!(completions.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn draft_is_frozen_while_submitting() {
    let (controller, _) = spawn_counted(2, fixture_evaluator());
    let mut rx = controller.subscribe();

    controller.update_draft("original");
    controller.submit();
    controller.update_draft("changed");
    controller.submit();

    let submitting = wait_until(&mut rx, |s| s.phase == SessionPhase::Submitting).await;
    assert_eq!(submitting.draft, "original");
    let submitted = wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;
    assert_eq!(submitted.draft, "original");
    assert_eq!(submitted.answered, 1);

    controller.exit().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn failed_evaluation_still_moves_on() {
    let (controller, completions) = spawn_counted(1, Arc::new(FailingEvaluator));
    let mut rx = controller.subscribe();

    controller.update_draft("answer");
    controller.submit();
    let submitted = wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;
    assert!(submitted.last_evaluation.is_none());

    let SessionOutcome::Completed(session) = controller.finish().await.unwrap() else {
        panic!("expected completion");
    };
    assert_eq!(session.answers.len(), 1);
    assert!(session.answers[0].evaluation.is_none());
    assert_eq!(session.average_score(), None);
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn index_stays_in_range_through_a_full_session() {
    let (controller, completions) = spawn_counted(3, fixture_evaluator());
    let mut rx = controller.subscribe();

    let observer = {
        let mut rx = controller.subscribe();
        tokio::spawn(async move {
            let mut seen = vec![rx.borrow_and_update().index];
            while rx.changed().await.is_ok() {
                let snapshot = rx.borrow_and_update();
                assert!(snapshot.index < snapshot.total);
                seen.push(snapshot.index);
            }
            seen
        })
    };

    for expected in 0..3 {
        wait_until(&mut rx, |s| s.index == expected && s.phase == SessionPhase::Answering).await;
        controller.update_draft(format!("answer {expected}"));
        controller.submit();
        wait_until(&mut rx, |s| s.phase == SessionPhase::Submitted).await;
    }

    controller.finish().await.unwrap();
    let seen = observer.await.unwrap();
    assert_eq!(seen.iter().max(), Some(&2));
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}
