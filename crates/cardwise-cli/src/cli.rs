//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cardwise - Score the cards you hold and find better ones
#[derive(Parser)]
#[command(name = "cardwise")]
#[command(about = "Card benefit efficiency analysis and recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot JSON with cards, benefit rules, ownership and expenses
    #[arg(long, default_value = "snapshot.json", global = true)]
    pub snapshot: PathBuf,

    /// Extra expenses CSV (owner,category_id,amount,occurred_at)
    #[arg(long, global = true)]
    pub expenses: Option<PathBuf>,

    /// Engine config TOML (defaults to the data-dir override, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score owned cards and recommend new ones
    Analyze {
        /// User id
        #[arg(short, long)]
        user: i64,

        /// Calendar month (YYYY-MM); defaults to the trailing window ending now.
        /// The benefit is still averaged over the configured observation months,
        /// so pass `--months 1` to score a single month on its own
        #[arg(short, long)]
        month: Option<String>,

        /// Months to average the benefit over (defaults to config)
        #[arg(long)]
        months: Option<u32>,
    },

    /// Recommend cards for the user's top spending category
    Recommend {
        /// User id
        #[arg(short, long)]
        user: i64,

        /// Calendar month (YYYY-MM); defaults to the trailing window ending now
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Compare a month's spending with other users
    Pattern {
        /// User id
        #[arg(short, long)]
        user: i64,

        /// Calendar month (YYYY-MM)
        #[arg(short, long)]
        month: String,
    },

    /// List a month's expenses with their total
    Expenses {
        /// User id
        #[arg(short, long)]
        user: i64,

        /// Calendar month (YYYY-MM)
        #[arg(short, long)]
        month: String,
    },

    /// List the cards a user holds
    Cards {
        /// User id
        #[arg(short, long)]
        user: i64,
    },

    /// Show the effective engine configuration
    Config,
}
