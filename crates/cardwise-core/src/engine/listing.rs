//! Monthly expense listing

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{ExpenseLine, ExpenseListing, ExpenseRecord, UserId};
use crate::window::SpendingWindow;

use super::aggregate::checked_total;

/// Shown for expenses whose category is missing from the catalog
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The owner's in-window expenses, oldest first, with their total
pub fn list_expenses(
    owner: UserId,
    records: &[ExpenseRecord],
    catalog: &Catalog,
    window: &SpendingWindow,
) -> Result<ExpenseListing> {
    let mut in_window: Vec<&ExpenseRecord> = Vec::new();
    for record in records {
        record.validate()?;
        if record.owner == owner && window.contains(record.occurred_at) {
            in_window.push(record);
        }
    }
    in_window.sort_by_key(|r| r.occurred_at);

    let mut total_spent = 0i64;
    let mut expenses = Vec::with_capacity(in_window.len());
    for record in in_window {
        total_spent = checked_total(total_spent, record.amount, "Monthly spending total")?;
        expenses.push(ExpenseLine {
            occurred_at: record.occurred_at,
            amount: record.amount,
            category_id: record.category_id,
            category_name: catalog
                .category_name(record.category_id)
                .unwrap_or(UNCATEGORIZED)
                .to_string(),
        });
    }

    tracing::debug!(owner, count = expenses.len(), total_spent, "Listed expenses");

    Ok(ExpenseListing {
        owner,
        total_spent,
        expenses,
    })
}
