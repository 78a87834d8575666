//! Plain-text rendering of the ui view models.

use anyhow::{Context, Result};
use serde::Serialize;

use ui::vm::{DashboardVm, FeedbackPageVm, InterviewVm, LeaderboardRowVm, TimerUrgency};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
    println!("{text}");
    Ok(())
}

pub fn print_dashboard(vm: &DashboardVm) {
    for card in &vm.stats {
        let change = if card.change.is_empty() {
            String::new()
        } else {
            format!(" ({})", card.change)
        };
        println!("{:<22}{}{change}  {}", card.title, card.value, card.description);
    }

    println!();
    println!("Recent interviews:");
    if vm.recent.is_empty() {
        println!("  none yet");
    }
    for row in &vm.recent {
        let score = row.score.map_or_else(|| "-".to_owned(), |s| format!("{s}%"));
        println!(
            "  {:<32} {:<14} {:<12} {:>5} {:>7}  {} -> {}",
            row.title, row.date, row.status, score, row.duration, row.action, row.target
        );
    }
}

pub fn print_feedback(vm: &FeedbackPageVm) {
    println!("{} ({})", vm.title, vm.date);
    if let Some(score) = vm.overall_score {
        println!("Overall score: {score}/100");
    }
    for card in &vm.cards {
        println!();
        println!("{} [{} | {}]", card.heading, card.category, card.difficulty);
        println!("{}", card.question);
        println!("Your answer: {}", card.answer);
        if let Some(score) = card.score {
            println!("Score: {score}/100");
            println!("{}", card.feedback);
        }
        if !card.strengths.is_empty() {
            println!("Strengths:");
            for s in &card.strengths {
                println!("  + {s}");
            }
        }
        if !card.improvements.is_empty() {
            println!("Areas for improvement:");
            for s in &card.improvements {
                println!("  - {s}");
            }
        }
    }
}

pub fn print_leaderboard(rows: &[LeaderboardRowVm]) {
    if rows.is_empty() {
        println!("No users found");
        return;
    }
    for row in rows {
        let marker = if row.highlighted { ">" } else { " " };
        println!(
            "{marker} {:>3}  {:<26} {:>4}  {:>3} interviews  {}",
            row.rank, row.name, row.score, row.interviews, row.best_category
        );
    }
}

pub fn print_question(vm: &InterviewVm) {
    println!();
    println!("{}  [{} | {}]  {} left", vm.badge, vm.category, vm.difficulty, vm.timer);
    println!("{}", vm.question);
    println!("Type your answer. /submit to hand it in, /clear to start over, /exit to leave.");
    println!("{}", vm.word_caption);
}

pub fn print_timer(vm: &InterviewVm) {
    if vm.time_is_up {
        println!("Time is up. You can still submit your answer. ({})", vm.word_caption);
        return;
    }
    let marker = match vm.urgency {
        TimerUrgency::Critical => "!! ",
        TimerUrgency::Warning => "! ",
        TimerUrgency::Normal => "",
    };
    println!("{marker}{} left ({})", vm.timer, vm.word_caption);
}

pub fn print_evaluation(vm: &InterviewVm) {
    match (vm.evaluation_score, vm.evaluation_feedback.as_deref()) {
        (Some(score), Some(feedback)) => println!("Score: {score}/100. {feedback}"),
        _ => println!("No evaluation is available for this answer."),
    }
}
