//! Card analysis and recommendation commands

use std::collections::HashSet;

use anyhow::{Context, Result};
use cardwise_core::{
    AnalysisOrchestrator, AnalysisResult, CardRepository, EngineConfig, ExpenseRepository,
    RecommendationBlock, Snapshot, SpendingWindow,
};
use chrono::Utc;

use super::{resolve_window, truncate};

/// Run the full analysis for `user` over `window`
pub fn build_analysis(
    snapshot: &Snapshot,
    config: &EngineConfig,
    user: i64,
    window: &SpendingWindow,
    months: Option<u32>,
) -> Result<AnalysisResult> {
    let mut orchestrator = AnalysisOrchestrator::new(config);
    if let Some(months) = months {
        orchestrator = orchestrator.with_observation_months(months)?;
    }

    let owned = snapshot.owned_cards(user)?;
    let owned_rules = snapshot.owned_rules(user)?;
    let catalog = snapshot.catalog()?;
    let expenses = snapshot.expenses_for(user, window)?;

    orchestrator
        .analyze(&owned, &owned_rules, &catalog, &expenses, window)
        .with_context(|| format!("Analysis failed for user {}", user))
}

/// Recommendations only, skipping the owned-card ROI table
pub fn build_recommendations(
    snapshot: &Snapshot,
    config: &EngineConfig,
    user: i64,
    window: &SpendingWindow,
) -> Result<RecommendationBlock> {
    let owned: HashSet<i64> = snapshot
        .owned_cards(user)?
        .iter()
        .map(|c| c.card_id)
        .collect();
    let catalog = snapshot.catalog()?;
    let expenses = snapshot.expenses_for(user, window)?;

    let block = AnalysisOrchestrator::new(config).recommend(&owned, &catalog, &expenses, window)?;
    Ok(block)
}

pub fn cmd_analyze(
    snapshot: &Snapshot,
    config: &EngineConfig,
    user: i64,
    month: Option<&str>,
    months: Option<u32>,
    json: bool,
) -> Result<()> {
    let window = resolve_window(month, config, Utc::now())?;
    let result = build_analysis(snapshot, config, user, &window, months)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("💳 Card Analysis for user {}", user);
    println!("   Window: {} to {}", window.start(), window.end());
    println!("   ─────────────────────────────────────────────────────────────");

    if result.owned_card_rois.is_empty() {
        println!("   No cards held.");
    } else {
        println!(
            "   {:>5} │ {:24} │ {:>8} │ {:>12} │ {}",
            "ID", "Card", "ROI %", "Monthly", "Label"
        );
        println!("   ──────┼──────────────────────────┼──────────┼──────────────┼────────────");
        for row in &result.owned_card_rois {
            println!(
                "   {:>5} │ {:24} │ {:>8} │ {:>12} │ {}",
                row.card_id,
                truncate(&row.display_name, 24),
                row.roi_ratio,
                row.monthly_benefit_average,
                row.classification_label
            );
        }
    }

    print_recommendations(&result.recommendations);
    Ok(())
}

pub fn cmd_recommend(
    snapshot: &Snapshot,
    config: &EngineConfig,
    user: i64,
    month: Option<&str>,
    json: bool,
) -> Result<()> {
    let window = resolve_window(month, config, Utc::now())?;
    let block = build_recommendations(snapshot, config, user, &window)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&block)?);
        return Ok(());
    }

    println!();
    println!("💡 Recommendations for user {}", user);
    println!("   Window: {} to {}", window.start(), window.end());
    print_recommendations(&block);
    Ok(())
}

fn print_recommendations(block: &RecommendationBlock) {
    println!();

    let Some(target) = block.target_category else {
        println!("   Not enough spending data to recommend cards.");
        return;
    };

    let name = block
        .target_category_name
        .clone()
        .unwrap_or_else(|| format!("category {}", target));
    println!("   Top category: {}", name);

    if block.entries.is_empty() {
        println!("   No unowned cards offer a benefit in this category.");
        return;
    }

    println!("   {:>5} │ {:24} │ {:>8}", "ID", "Card", "Rate %");
    println!("   ──────┼──────────────────────────┼──────────");
    for entry in &block.entries {
        println!(
            "   {:>5} │ {:24} │ {:>8}",
            entry.card_id,
            truncate(&entry.display_name, 24),
            entry.benefit_rate
        );
    }
}
