//! cardwise CLI - Card benefit efficiency analysis
//!
//! Usage:
//!   cardwise analyze --user 1                 Score owned cards, recommend new ones
//!   cardwise recommend --user 1 --month 2026-03
//!   cardwise pattern --user 1 --month 2026-03 Compare spending with other users
//!   cardwise expenses --user 1 --month 2026-03
//!   cardwise cards --user 1                   List owned cards

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let (config, source) = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            user,
            month,
            months,
        } => {
            let snapshot = commands::open_snapshot(&cli.snapshot, cli.expenses.as_deref())?;
            commands::cmd_analyze(
                &snapshot,
                &config,
                user,
                month.as_deref(),
                months,
                cli.json,
            )
        }
        Commands::Recommend { user, month } => {
            let snapshot = commands::open_snapshot(&cli.snapshot, cli.expenses.as_deref())?;
            commands::cmd_recommend(&snapshot, &config, user, month.as_deref(), cli.json)
        }
        Commands::Pattern { user, month } => {
            let snapshot = commands::open_snapshot(&cli.snapshot, cli.expenses.as_deref())?;
            commands::cmd_pattern(&snapshot, user, &month, cli.json)
        }
        Commands::Expenses { user, month } => {
            let snapshot = commands::open_snapshot(&cli.snapshot, cli.expenses.as_deref())?;
            commands::cmd_expenses(&snapshot, user, &month, cli.json)
        }
        Commands::Cards { user } => {
            let snapshot = commands::open_snapshot(&cli.snapshot, cli.expenses.as_deref())?;
            commands::cmd_cards(&snapshot, user, cli.json)
        }
        Commands::Config => commands::cmd_config(&config, &source, cli.json),
    }
}
