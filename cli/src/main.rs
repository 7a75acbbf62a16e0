//! motor-sim CLI
//!
//! `run` hosts the single controller instance over the bundled in-memory
//! store: the PID simulation, command polling, telemetry writing, a TCP
//! command ingress and an interactive operator prompt. `send` feeds one
//! command into a running controller from another process.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Motor command-log simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Host the controller: simulation, command polling, telemetry, ingress
    Run(commands::run::RunArgs),

    /// Send one speed-change command to a running controller
    Send(commands::send::SendArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .compact()
        .init();

    match Cli::parse().command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Send(args) => commands::send::execute(&args),
    }
}
