mod render;
mod terminal;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use prep_core::model::{InterviewId, SessionSettings};
use services::{AppServices, Clock, RegistrationForm, SignInForm};
use storage::fixtures::DEMO_USER_EMAIL;
use ui::vm::{map_dashboard, map_feedback_report, map_standings};
use ui::{AppContext, Route, UiApp, ViewError, build_app_context};

#[derive(Parser)]
#[command(name = "prep")]
#[command(about = "Timed mock interview practice in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Account to sign in with
    #[arg(long, env = "PREP_EMAIL", default_value = DEMO_USER_EMAIL, global = true)]
    email: String,

    /// Required but not verified
    #[arg(long, env = "PREP_PASSWORD", default_value = "practice", global = true)]
    password: String,

    /// Seconds allowed per question
    #[arg(long, env = "PREP_QUESTION_SECS", default_value_t = 120, global = true)]
    question_secs: u32,

    /// Simulated evaluation delay in milliseconds
    #[arg(long, env = "PREP_EVALUATION_MS", default_value_t = 3_000, global = true)]
    evaluation_ms: u64,

    /// Pause after each evaluation before the next question, in milliseconds
    #[arg(long, env = "PREP_REVIEW_MS", default_value_t = 2_000, global = true)]
    review_ms: u64,

    /// Ask at most this many questions
    #[arg(long, env = "PREP_QUESTION_LIMIT", global = true)]
    question_limit: Option<u32>,

    /// Shuffle the question bank before each interview
    #[arg(long, env = "PREP_SHUFFLE", global = true)]
    shuffle: bool,

    /// Print view models as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timed interview (default)
    Interview,
    /// Progress stats and recent interviews
    Dashboard,
    /// Feedback for one interview, or the latest completed one
    Feedback {
        #[arg(long, value_name = "ID")]
        interview_id: Option<InterviewId>,
    },
    /// Global rankings
    Leaderboard {
        /// Case-insensitive name filter
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Create an account for --email / --password
    Register {
        #[arg(long)]
        name: String,
    },
}

impl Cli {
    fn settings(&self) -> Result<SessionSettings> {
        SessionSettings::new(
            self.question_secs,
            self.evaluation_ms,
            self.review_ms,
            self.question_limit,
            self.shuffle,
        )
        .context("invalid session settings")
    }
}

/// Attach the user-facing message for a service error.
fn explain<E>(err: E) -> anyhow::Error
where
    E: std::error::Error + Send + Sync + 'static,
    for<'a> ViewError: From<&'a E>,
{
    let message = ViewError::from(&err).message();
    anyhow::Error::new(err).context(message)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn heading(route: Route) {
    println!("== {} ({}) ==", route.title(), route.path());
}

async fn sign_in(ctx: &AppContext, cli: &Cli) -> Result<()> {
    let form = SignInForm {
        email: cli.email.clone(),
        password: cli.password.clone(),
    };
    let session = ctx.accounts().sign_in(&form).await.map_err(explain)?;
    ctx.set_user(session);
    Ok(())
}

async fn run() -> Result<()> {
    let mut cli = Cli::parse();
    init_tracing();
    let command = cli.command.take().unwrap_or(Commands::Interview);

    let services = AppServices::new_seeded(Clock::default(), cli.settings()?)
        .context("failed to load sample data")?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let ctx = build_app_context(&app);

    match command {
        Commands::Interview => {
            sign_in(&ctx, &cli).await?;
            heading(Route::Interview);
            terminal::run_interview(&ctx).await?;
        }
        Commands::Dashboard => {
            sign_in(&ctx, &cli).await?;
            let user_id = ctx.current_user_id().context("not signed in")?;
            let overview = ctx.dashboard().overview(user_id).await.map_err(explain)?;
            let vm = map_dashboard(&overview);
            if cli.json {
                render::print_json(&vm)?;
            } else {
                heading(Route::Dashboard);
                render::print_dashboard(&vm);
            }
        }
        Commands::Feedback { interview_id } => {
            sign_in(&ctx, &cli).await?;
            let user_id = ctx.current_user_id().context("not signed in")?;
            let feedback = ctx.feedback();
            let report = match interview_id {
                Some(id) => feedback.report(id).await,
                None => feedback.latest_report(user_id).await,
            }
            .map_err(explain)?;
            let vm = map_feedback_report(&report);
            if cli.json {
                render::print_json(&vm)?;
            } else {
                heading(interview_id.map_or(Route::Feedback, Route::FeedbackFor));
                render::print_feedback(&vm);
            }
        }
        Commands::Leaderboard { search } => {
            sign_in(&ctx, &cli).await?;
            let standings = ctx
                .leaderboard()
                .standings(ctx.current_user_id(), &search)
                .await
                .map_err(explain)?;
            let rows = map_standings(&standings);
            if cli.json {
                render::print_json(&rows)?;
            } else {
                heading(Route::Leaderboard);
                render::print_leaderboard(&rows);
            }
        }
        Commands::Register { name } => {
            let form = RegistrationForm {
                name,
                email: cli.email.clone(),
                password: cli.password.clone(),
            };
            let session = ctx.accounts().register(&form).await.map_err(explain)?;
            info!(user_id = %session.user_id(), "account created");
            heading(Route::Register);
            println!(
                "Welcome, {}! Your account ({}) is ready.",
                session.user().name(),
                session.user().email()
            );
            ctx.set_user(session);
        }
    }

    ctx.sign_out();
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
