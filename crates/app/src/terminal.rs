//! Line-based front end for a live interview session.

use anyhow::{Context, Result};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::{debug, info};

use prep_core::SessionPhase;
use services::{SessionOutcome, SessionSnapshot};
use ui::AppContext;
use ui::vm::{InterviewVm, map_feedback_report};

use crate::{explain, render};

/// Remaining seconds at which the countdown is announced.
const ANNOUNCE_AT: [u32; 4] = [60, 30, 10, 0];

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Text(&'a str),
    Submit,
    Clear,
    Exit,
    Help,
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            return Self::Text(line);
        }
        match trimmed {
            "/submit" => Self::Submit,
            "/clear" => Self::Clear,
            "/exit" | "/quit" => Self::Exit,
            "/help" => Self::Help,
            other => Self::Unknown(other),
        }
    }
}

fn append_line(draft: &mut String, line: &str) {
    if !draft.is_empty() {
        draft.push('\n');
    }
    draft.push_str(line);
}

fn is_confirmation(reply: Option<&str>) -> bool {
    matches!(
        reply.map(|r| r.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes")
    )
}

/// Print whatever changed between two snapshots.
fn announce(prev: &SessionSnapshot, next: &SessionSnapshot) {
    let vm = InterviewVm::from(next);
    if next.index != prev.index {
        render::print_question(&vm);
        return;
    }
    if next.phase != prev.phase {
        match next.phase {
            SessionPhase::Submitting => println!("Evaluating your answer..."),
            SessionPhase::Submitted => render::print_evaluation(&vm),
            SessionPhase::Answering => {}
        }
    }
    if next.remaining_secs != prev.remaining_secs && ANNOUNCE_AT.contains(&next.remaining_secs) {
        render::print_timer(&vm);
    }
}

/// Announce `next` against what was last shown and make it the shown state.
/// Moving to another question discards the local draft.
fn catch_up(shown: &mut SessionSnapshot, draft: &mut String, next: SessionSnapshot) {
    if next.index != shown.index {
        draft.clear();
    }
    announce(shown, &next);
    *shown = next;
}

fn print_help() {
    println!("Plain lines are added to your answer.");
    println!("  /submit  hand in the answer");
    println!("  /clear   discard the answer so far");
    println!("  /exit    leave the interview without saving");
}

pub async fn run_interview(ctx: &AppContext) -> Result<()> {
    let user_id = ctx
        .current_user_id()
        .context("sign in before starting an interview")?;

    let (done_tx, mut done_rx) = oneshot::channel();
    let controller = ctx
        .interview_loop()
        .start_interview(move || {
            let _ = done_tx.send(());
        })
        .await
        .map_err(explain)?;
    info!(session_id = %controller.id(), %user_id, "interview started");

    let mut snapshots = controller.subscribe();
    let mut shown = snapshots.borrow_and_update().clone();
    render::print_question(&InterviewVm::from(&shown));

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut draft = String::new();

    let outcome = loop {
        tokio::select! {
            _ = &mut done_rx => break controller.finish().await,

            changed = snapshots.changed() => {
                if changed.is_err() {
                    break controller.finish().await;
                }
                let next = snapshots.borrow_and_update().clone();
                catch_up(&mut shown, &mut draft, next);
            }

            line = lines.next_line() => {
                let Some(line) = line.context("failed to read input")? else {
                    debug!("input closed");
                    break controller.exit().await;
                };
                match Input::parse(&line) {
                    Input::Text(text) => {
                        if shown.phase != SessionPhase::Answering {
                            println!("Your answer is locked until the next question.");
                            continue;
                        }
                        append_line(&mut draft, text);
                        controller.update_draft(draft.clone());
                    }
                    Input::Submit => {
                        if draft.trim().is_empty() {
                            println!("Write an answer before submitting.");
                        } else if shown.phase != SessionPhase::Answering {
                            println!("Your answer is already being processed.");
                        } else {
                            controller.submit();
                        }
                    }
                    Input::Clear => {
                        draft.clear();
                        controller.update_draft(String::new());
                    }
                    Input::Exit => {
                        if controller.exit_requires_confirmation() {
                            println!("Leave the interview? Your progress will be lost. [y/N]");
                            let reply = lines.next_line().await.context("failed to read input")?;
                            if !is_confirmation(reply.as_deref()) {
                                // The session kept running while the prompt was open.
                                let latest = snapshots.borrow_and_update().clone();
                                catch_up(&mut shown, &mut draft, latest);
                                continue;
                            }
                        }
                        break controller.exit().await;
                    }
                    Input::Help => print_help(),
                    Input::Unknown(command) => {
                        println!("Unknown command {command}. Type /help for the list.");
                    }
                }
            }
        }
    };

    match outcome.map_err(explain)? {
        SessionOutcome::Completed(session) => {
            let recorded = ctx
                .interview_loop()
                .record_completion(user_id, &session)
                .await
                .map_err(explain)?;
            println!();
            println!(
                "Interview complete! Score {}/100, {} min.",
                recorded.interview.score().unwrap_or(0),
                recorded.interview.duration_minutes().unwrap_or(0)
            );
            let report = ctx
                .feedback()
                .report(recorded.interview.id())
                .await
                .map_err(explain)?;
            println!();
            render::print_feedback(&map_feedback_report(&report));
        }
        SessionOutcome::Exited { answered } => {
            info!(answered, "interview abandoned");
            println!("Interview ended. {answered} answer(s) discarded.");
        }
    }
    Ok(())
}
