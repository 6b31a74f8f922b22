//! pomodoro - Terminal pomodoro timer
//!
//! Usage:
//!   pomodoro [-w MINS] [-s MINS] [-l MINS]
//!
//! Runs work/break sessions until Ctrl-C.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pomodoro::{Console, DesktopNotifier, Orchestrator};

use cli::Cli;

fn main() -> Result<()> {
    // Logs go to stderr so they never land on the countdown line
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let durations = cli.durations();
    tracing::debug!(?durations, "starting");

    pomodoro::signal::install().context("Failed to install interrupt handler")?;

    let mut orchestrator = Orchestrator::new(
        Console::detect(),
        Box::new(DesktopNotifier::detect()),
        durations,
    );
    orchestrator
        .run_until_interrupted()
        .context("Pomodoro timer failed")?;

    Ok(())
}
