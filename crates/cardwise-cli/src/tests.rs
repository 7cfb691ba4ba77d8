//! CLI command tests
//!
//! Commands run against snapshot fixtures written to a temp directory.

use std::path::PathBuf;

use cardwise_core::{ConfigSource, EngineConfig, SpendingWindow};
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tempfile::TempDir;

use crate::commands::{self, truncate};

const SNAPSHOT: &str = r#"{
    "categories": [
        {"category_id": 1, "name": "Dining"},
        {"category_id": 2, "name": "Transit"}
    ],
    "cards": [
        {"card_id": 1, "display_name": "Everyday Two", "issuer": "Acme", "annual_fee": 10000},
        {"card_id": 2, "display_name": "ABC Platinum", "issuer": "ABC", "annual_fee": 20000},
        {"card_id": 3, "display_name": "ABC Platinum Plus", "issuer": "ABC", "annual_fee": 35000},
        {"card_id": 4, "display_name": "Metro Rider", "issuer": "Metro", "annual_fee": 5000}
    ],
    "benefit_rules": [
        {"card_id": 1, "category_id": 1, "rate": "2"},
        {"card_id": 2, "category_id": 1, "rate": "3", "cap": 15000},
        {"card_id": 3, "category_id": 1, "rate": "5", "cap": 30000},
        {"card_id": 4, "category_id": 2, "rate": "10", "cap": 5000}
    ],
    "user_cards": [
        {"owner": 1, "card_id": 1},
        {"owner": 2, "card_id": 4}
    ],
    "expenses": [
        {"owner": 1, "category_id": 1, "amount": 60000, "occurred_at": "2026-03-03T12:00:00Z"},
        {"owner": 1, "category_id": 1, "amount": 40000, "occurred_at": "2026-03-17T12:00:00Z"},
        {"owner": 1, "category_id": 2, "amount": 30000, "occurred_at": "2026-03-09T12:00:00Z"},
        {"owner": 2, "category_id": 2, "amount": 70000, "occurred_at": "2026-03-11T12:00:00Z"}
    ]
}"#;

fn setup_snapshot() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, SNAPSHOT).unwrap();
    (dir, path)
}

fn march() -> SpendingWindow {
    SpendingWindow::month(2026, 3).unwrap()
}

// ========== Shared Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("ABC Platinum Plus", 10), "ABC Pla...");
    assert_eq!(truncate("삼성카드 taptap O", 6), "삼성카...");
}

#[test]
fn test_open_snapshot_with_expenses_csv() {
    let (dir, path) = setup_snapshot();
    let csv_path = dir.path().join("extra.csv");
    std::fs::write(
        &csv_path,
        "owner,category_id,amount,occurred_at\n1,1,5000,2026-03-25T08:00:00Z\n",
    )
    .unwrap();

    let snapshot = commands::open_snapshot(&path, Some(&csv_path)).unwrap();
    assert_eq!(snapshot.expenses.len(), 5);
}

#[test]
fn test_open_snapshot_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::open_snapshot(&dir.path().join("nope.json"), None);
    assert!(result.is_err());
}

#[test]
fn test_load_config_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "[recommendation]\nlimit = 1\n").unwrap();

    let (config, source) = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.recommendation.limit, 1);
    assert_eq!(config.roi.fee_floor, 1000);
    assert!(matches!(source, ConfigSource::File(_)));
}

#[test]
fn test_load_config_missing_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::load_config(Some(&dir.path().join("missing.toml")));
    assert!(result.is_err());
}

#[test]
fn test_resolve_window() {
    let config = EngineConfig::default();
    let now = Utc.with_ymd_and_hms(2026, 4, 10, 9, 0, 0).unwrap();

    let month = commands::resolve_window(Some("2026-03"), &config, now).unwrap();
    assert_eq!(month, march());

    let trailing = commands::resolve_window(None, &config, now).unwrap();
    assert_eq!(trailing.end(), now);
    assert_eq!(trailing.start(), now - chrono::Duration::days(90));

    assert!(commands::resolve_window(Some("March"), &config, now).is_err());

    // Out-of-range trailing spans are errors rather than panics
    let mut wide = EngineConfig::default();
    wide.window.trailing_days = u32::MAX;
    assert!(commands::resolve_window(None, &wide, now).is_err());
}

// ========== Analysis Command Tests ==========

#[test]
fn test_build_analysis() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();
    let config = EngineConfig::default();

    let result = commands::build_analysis(&snapshot, &config, 1, &march(), None).unwrap();

    assert_eq!(result.owned_card_rois.len(), 1);
    assert_eq!(result.owned_card_rois[0].roi_ratio, Decimal::new(800, 1));
    assert_eq!(result.target_category(), Some(1));

    let ids: Vec<_> = result
        .recommendations
        .entries
        .iter()
        .map(|e| e.card_id)
        .collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_build_analysis_months_override() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();
    let config = EngineConfig::default();

    // 2,000 benefit over one month against a 10,000 fee
    let result = commands::build_analysis(&snapshot, &config, 1, &march(), Some(1)).unwrap();
    assert_eq!(result.owned_card_rois[0].roi_ratio, Decimal::new(2400, 1));
    assert_eq!(result.owned_card_rois[0].classification_label, "high efficiency");

    assert!(commands::build_analysis(&snapshot, &config, 1, &march(), Some(0)).is_err());
}

#[test]
fn test_build_recommendations_without_history() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();
    let config = EngineConfig::default();
    let january = SpendingWindow::month(2026, 1).unwrap();

    let block = commands::build_recommendations(&snapshot, &config, 1, &january).unwrap();
    assert!(block.is_empty());
    assert_eq!(block.target_category, None);
}

#[test]
fn test_cmd_analyze_and_recommend() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();
    let config = EngineConfig::default();

    assert!(commands::cmd_analyze(&snapshot, &config, 1, Some("2026-03"), None, false).is_ok());
    assert!(commands::cmd_analyze(&snapshot, &config, 1, Some("2026-03"), None, true).is_ok());
    assert!(commands::cmd_recommend(&snapshot, &config, 1, Some("2026-03"), false).is_ok());

    // No history is a notice, not an error
    assert!(commands::cmd_recommend(&snapshot, &config, 9, Some("2026-03"), false).is_ok());
    assert!(commands::cmd_analyze(&snapshot, &config, 1, Some("2026-13"), None, false).is_err());
}

// ========== Pattern Command Tests ==========

#[test]
fn test_build_pattern() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();

    let report = commands::build_pattern(&snapshot, 1, "2026-03").unwrap();
    assert_eq!(report.comparison.my_total_spent, 130_000);
    assert_eq!(report.comparison.group_avg_spent, 100_000);
    assert_eq!(report.comparison.diff_percent, Decimal::new(300, 1));
    assert_eq!(report.comparison.percentile, 100);

    // User 2 holds the capped transit card: 7,000 earned, capped at 5,000
    let report = commands::build_pattern(&snapshot, 2, "2026-03").unwrap();
    assert_eq!(report.benefit_status.total_benefit_received, 5_000);
    assert_eq!(report.benefit_status.max_benefit_limit, 5_000);
    assert_eq!(report.benefit_status.achievement_rate, Decimal::new(1000, 1));
}

#[test]
fn test_cmd_pattern() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();

    assert!(commands::cmd_pattern(&snapshot, 1, "2026-03", false).is_ok());
    assert!(commands::cmd_pattern(&snapshot, 1, "2026-03", true).is_ok());
    assert!(commands::cmd_pattern(&snapshot, 1, "not-a-month", false).is_err());
}

// ========== Expenses Command Tests ==========

#[test]
fn test_build_expense_listing() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();

    let listing = commands::build_expense_listing(&snapshot, 1, "2026-03").unwrap();
    assert_eq!(listing.total_spent, 130_000);
    assert_eq!(listing.expenses.len(), 3);
    assert_eq!(listing.expenses[0].amount, 60_000);
    assert_eq!(listing.expenses[1].category_name, "Transit");

    let empty = commands::build_expense_listing(&snapshot, 1, "2026-02").unwrap();
    assert_eq!(empty.total_spent, 0);
}

#[test]
fn test_cmd_expenses() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();

    assert!(commands::cmd_expenses(&snapshot, 1, "2026-03", false).is_ok());
    assert!(commands::cmd_expenses(&snapshot, 1, "2026-03", true).is_ok());
    assert!(commands::cmd_expenses(&snapshot, 1, "2026/03", false).is_err());
}

// ========== Cards and Config Command Tests ==========

#[test]
fn test_cmd_cards() {
    let (_dir, path) = setup_snapshot();
    let snapshot = commands::open_snapshot(&path, None).unwrap();

    assert!(commands::cmd_cards(&snapshot, 1, false).is_ok());
    assert!(commands::cmd_cards(&snapshot, 1, true).is_ok());
    assert!(commands::cmd_cards(&snapshot, 42, false).is_ok());
}

#[test]
fn test_cmd_config() {
    let config = EngineConfig::default();
    assert!(commands::cmd_config(&config, &ConfigSource::Embedded, false).is_ok());
    assert!(commands::cmd_config(&config, &ConfigSource::Embedded, true).is_ok());
}
