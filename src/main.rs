//! FSM Designer command-line entry point.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use fsm_designer::interpreter::{run_interactive, Command, Session};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Declare and run deterministic finite-state machines.
#[derive(Parser, Debug)]
#[command(name = "fsm-designer", version, about)]
struct Cli {
    /// Script (.txt) or compiled machine (.fs) to load instead of prompting
    script: Option<PathBuf>,

    /// Log every command to this file from the start
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Prompt shown while waiting for a command
    #[arg(long, default_value = "? ")]
    prompt: String,

    /// Do not print the startup banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.quiet {
        println!(
            "FSM DESIGNER {} {}",
            env!("CARGO_PKG_VERSION"),
            Local::now().format("%B %-d, %Y, %H:%M")
        );
    }

    let mut session = Session::new(io::stdout());
    if let Some(path) = cli.log {
        session.run(Command::Log(Some(path)));
    }

    let outcome = match cli.script {
        Some(path) => session.run(Command::Load(path)),
        None => run_interactive(&mut session, &cli.prompt)?,
    };

    info!(?outcome, "session finished");
    // Dropping the session closes the command log.
    drop(session);
    Ok(())
}
