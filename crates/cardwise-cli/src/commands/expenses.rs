//! Monthly expense listing command

use anyhow::{Context, Result};
use cardwise_core::engine::list_expenses;
use cardwise_core::{CardRepository, ExpenseListing, ExpenseRepository, Snapshot, SpendingWindow};

use super::truncate;

pub fn build_expense_listing(
    snapshot: &Snapshot,
    user: i64,
    month: &str,
) -> Result<ExpenseListing> {
    let window = SpendingWindow::parse_month(month)
        .with_context(|| format!("Invalid --month '{}'", month))?;

    let expenses = snapshot.expenses_for(user, &window)?;
    let catalog = snapshot.catalog()?;

    let listing = list_expenses(user, &expenses, &catalog, &window)?;
    Ok(listing)
}

pub fn cmd_expenses(snapshot: &Snapshot, user: i64, month: &str, json: bool) -> Result<()> {
    let listing = build_expense_listing(snapshot, user, month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!();
    println!("🧾 Expenses for user {} ({})", user, month);
    println!("   ─────────────────────────────────────────────────────────────");

    if listing.expenses.is_empty() {
        println!("   No expenses found in this month.");
        return Ok(());
    }

    println!("   Total: {}", listing.total_spent);
    println!();
    println!("   {:19} │ {:20} │ {:>12}", "Date", "Category", "Amount");
    println!("   ────────────────────┼──────────────────────┼──────────────");
    for line in &listing.expenses {
        println!(
            "   {:19} │ {:20} │ {:>12}",
            line.occurred_at.format("%Y-%m-%d %H:%M").to_string(),
            truncate(&line.category_name, 20),
            line.amount
        );
    }

    Ok(())
}
