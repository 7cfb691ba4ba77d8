//! Spending aggregation
//!
//! Reduces expense records to per-category totals for a window, picks the
//! dominant category, and places a user's total within a peer population.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{CategoryAggregate, CategoryId, ExpenseRecord};
use crate::window::SpendingWindow;

/// Per-category totals for one window
///
/// Categories with no records in the window are absent rather than zero, so
/// callers can tell "no spend" apart from "zero spend".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendingTotals {
    pub by_category: BTreeMap<CategoryId, i64>,
    pub grand_total: i64,
}

impl SpendingTotals {
    /// Total for a category, `None` if it never appeared in the window
    pub fn get(&self, category_id: CategoryId) -> Option<i64> {
        self.by_category.get(&category_id).copied()
    }

    /// Total for a category, treating absent categories as zero
    pub fn total_for(&self, category_id: CategoryId) -> i64 {
        self.get(category_id).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }

    /// Totals as records, ordered by category id
    pub fn aggregates(&self) -> Vec<CategoryAggregate> {
        self.by_category
            .iter()
            .map(|(&category_id, &total_amount)| CategoryAggregate {
                category_id,
                total_amount,
            })
            .collect()
    }

    pub fn dominant_category(&self) -> Option<CategoryId> {
        dominant_category(&self.by_category)
    }
}

/// Sum in-window expense amounts per category
///
/// Every record is checked for a negative amount, including those outside the
/// window.
pub fn aggregate(records: &[ExpenseRecord], window: &SpendingWindow) -> Result<SpendingTotals> {
    let mut totals = SpendingTotals::default();
    let mut skipped = 0usize;

    for record in records {
        record.validate()?;

        if !window.contains(record.occurred_at) {
            skipped += 1;
            continue;
        }

        let entry = totals.by_category.entry(record.category_id).or_insert(0);
        *entry = checked_total(*entry, record.amount, "Category total")?;
        totals.grand_total = checked_total(totals.grand_total, record.amount, "Spending total")?;
    }

    tracing::debug!(
        records = records.len(),
        outside_window = skipped,
        categories = totals.by_category.len(),
        grand_total = totals.grand_total,
        "Aggregated spending"
    );

    Ok(totals)
}

/// Add two currency amounts, failing instead of wrapping past `i64::MAX`
pub(crate) fn checked_total(total: i64, amount: i64, what: &str) -> Result<i64> {
    total
        .checked_add(amount)
        .ok_or_else(|| Error::InvalidData(format!("{} overflows", what)))
}

/// The category with the largest total
///
/// Ties go to the lowest category id. Returns `None` for an empty map.
pub fn dominant_category(totals: &BTreeMap<CategoryId, i64>) -> Option<CategoryId> {
    let mut best: Option<(CategoryId, i64)> = None;

    // BTreeMap iterates in ascending id order, so only a strictly larger
    // total may replace the current best.
    for (&category_id, &total) in totals {
        match best {
            Some((_, best_total)) if total <= best_total => {}
            _ => best = Some((category_id, total)),
        }
    }

    best.map(|(category_id, _)| category_id)
}

/// Percentile position of `my_total` among `peer_totals`
///
/// `floor(100 * |{p : p <= my_total}| / |peers|)`, so a lower rank means lower
/// spend and the top spender ranks 100. Zero peers rank 0.
pub fn percentile_rank(my_total: i64, peer_totals: &[i64]) -> u8 {
    if peer_totals.is_empty() {
        return 0;
    }

    let at_or_below = peer_totals.iter().filter(|&&p| p <= my_total).count() as u64;
    let rank = 100 * at_or_below / peer_totals.len() as u64;

    // at_or_below <= len, so rank <= 100
    rank as u8
}
