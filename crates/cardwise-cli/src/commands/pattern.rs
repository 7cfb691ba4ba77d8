//! Consumption pattern command

use anyhow::{Context, Result};
use cardwise_core::{
    CardRepository, ConsumptionAnalyzer, ConsumptionPattern, ExpenseRepository, Snapshot,
    SpendingWindow,
};

pub fn build_pattern(snapshot: &Snapshot, user: i64, month: &str) -> Result<ConsumptionPattern> {
    let window = SpendingWindow::parse_month(month)
        .with_context(|| format!("Invalid --month '{}'", month))?;

    let expenses = snapshot.expenses_for(user, &window)?;
    let owned_rules = snapshot.owned_rules(user)?;
    let peers = snapshot.peer_totals(&window)?;

    let report = ConsumptionAnalyzer::new().analyze(user, &expenses, &owned_rules, &peers, &window)?;
    Ok(report)
}

pub fn cmd_pattern(snapshot: &Snapshot, user: i64, month: &str, json: bool) -> Result<()> {
    let report = build_pattern(snapshot, user, month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let cmp = &report.comparison;
    let status = &report.benefit_status;

    println!();
    println!("📊 Consumption Pattern for user {} ({})", user, month);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   My spending:      {:>12}", cmp.my_total_spent);
    println!("   Group average:    {:>12}", cmp.group_avg_spent);
    println!("   Difference:       {:>11}%", cmp.diff_percent);
    println!("   Percentile:       {:>12}", cmp.percentile);
    println!();
    println!("   Benefit received: {:>12}", status.total_benefit_received);
    if status.max_benefit_limit > 0 {
        println!("   Benefit limit:    {:>12}", status.max_benefit_limit);
        println!("   Achievement:      {:>11}%", status.achievement_rate);
    } else {
        println!("   \x1b[2mNo capped benefits on owned cards\x1b[0m");
    }

    Ok(())
}
