//! # Inkpad
//!
//! Command-line front end for a personal blog. Each run opens the post
//! store, performs one operation and prints the result.

use std::io;
use std::process::ExitCode;

use clap::Parser;

mod commands;
mod config;
mod state;
mod telemetry;

use commands::{Commands, Console, OutputFormat};
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[derive(Debug, Parser)]
#[command(name = "inkpad")]
#[command(about = "Inkpad - write, edit and browse your blog posts", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let mut state = AppState::init(&config).await?;

    let mut input = io::stdin().lock();
    let mut out = io::stdout();
    let mut err = io::stderr();
    let mut console = Console {
        input: &mut input,
        out: &mut out,
        err: &mut err,
    };

    commands::execute(cli.command, cli.format, &mut state, &mut console).await
}
