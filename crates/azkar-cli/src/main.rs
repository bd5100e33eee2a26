//! Azkar CLI - manage daily azkar reminders from the command line
//!
//! Preferences and the local reminder schedule live in a libSQL file.

mod cli;
mod commands;
mod config;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::completions::run_completions;
use crate::commands::notifications::run_notifications;
use crate::commands::options::run_options;
use crate::commands::prefs::run_prefs;
use crate::config::CliConfig;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let config = CliConfig::resolve(cli.db_path, cli.locale)?;
    tracing::debug!(?config, "Resolved configuration");

    match cli.command {
        Commands::Prefs { command } => run_prefs(command, &config).await,
        Commands::Options { slot } => run_options(slot.into(), &config).await,
        Commands::Notifications { command } => run_notifications(command, &config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("azkar=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
