//! Shared command utilities and the config command

use std::path::Path;

use anyhow::{Context, Result};
use cardwise_core::{ConfigSource, EngineConfig, Snapshot, SpendingWindow};
use chrono::{DateTime, Utc};

/// Load a snapshot and, if given, append expenses from a CSV file
pub fn open_snapshot(path: &Path, expenses_csv: Option<&Path>) -> Result<Snapshot> {
    let mut snapshot = Snapshot::load(path)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;

    if let Some(csv_path) = expenses_csv {
        let added = snapshot
            .load_expenses_csv(csv_path)
            .with_context(|| format!("Failed to load expenses {}", csv_path.display()))?;
        tracing::info!(count = added, "Imported expenses from CSV");
    }

    Ok(snapshot)
}

/// Resolve engine config from an explicit path, the data-dir override or defaults
pub fn load_config(path: Option<&Path>) -> Result<(EngineConfig, ConfigSource)> {
    let (config, source) = EngineConfig::load(path).context("Failed to load engine config")?;
    tracing::debug!(source = %source, "Engine config loaded");
    Ok((config, source))
}

/// A `YYYY-MM` month, or the configured trailing window ending at `now`
pub fn resolve_window(
    month: Option<&str>,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> Result<SpendingWindow> {
    match month {
        Some(month) => SpendingWindow::parse_month(month)
            .with_context(|| format!("Invalid --month '{}'", month)),
        None => SpendingWindow::trailing_days(now, config.window.trailing_days)
            .context("Invalid trailing window"),
    }
}

pub fn cmd_config(config: &EngineConfig, source: &ConfigSource, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!();
    println!("⚙️  Engine Configuration");
    println!("   Source: {}", source);
    println!("   ─────────────────────────────────────────────────────────────");
    print!("{}", config.to_toml()?);

    Ok(())
}
