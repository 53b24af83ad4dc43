use crate::commands::{run_assess, run_history, run_trends, AssessArgs, HistoryArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use glucocheck::config::AppConfig;
use glucocheck::error::AppError;
use glucocheck::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "glucocheck",
    about = "Score diabetes self-care questionnaires, track trends, and export reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one questionnaire from a JSON file and record it in the history
    Assess(AssessArgs),
    /// List recorded assessments, optionally exporting them as CSV
    History(HistoryArgs),
    /// Show score trends across the recorded history
    Trends,
    /// Walk through a few synthetic submissions and print the resulting trends
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Never call the advisory API, even when a key is configured
    #[arg(long)]
    pub(crate) offline: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Assess(args) => run_assess(&config, args).await,
        Command::History(args) => run_history(&config, args).await,
        Command::Trends => run_trends(&config).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
