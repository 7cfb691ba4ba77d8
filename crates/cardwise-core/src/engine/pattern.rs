//! Monthly consumption pattern report
//!
//! Compares a user's spend for a window with the peer population and shows how
//! much of the owned cards' capped benefit the user has already collected.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};
use crate::models::{
    BenefitRule, BenefitStatus, ConsumptionPattern, ExpenseRecord, SpendingComparison, UserId,
};
use crate::window::SpendingWindow;

use super::aggregate::{aggregate, checked_total, percentile_rank};
use super::benefit::realized_benefit;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsumptionAnalyzer;

impl ConsumptionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Build the report for `owner`
    ///
    /// `expenses` are the owner's records; `peer_totals` holds every user's
    /// total for the same window (usually including the owner's own).
    pub fn analyze(
        &self,
        owner: UserId,
        expenses: &[ExpenseRecord],
        owned_rules: &[BenefitRule],
        peer_totals: &[i64],
        window: &SpendingWindow,
    ) -> Result<ConsumptionPattern> {
        let totals = aggregate(expenses, window)?;
        let my_total = totals.grand_total;

        let group_avg = if peer_totals.is_empty() {
            Decimal::ZERO
        } else {
            let sum = peer_totals
                .iter()
                .try_fold(0i64, |acc, &t| checked_total(acc, t, "Peer spending sum"))?;
            Decimal::from(sum) / Decimal::from(peer_totals.len() as u64)
        };

        let diff_percent = if group_avg.is_zero() {
            Decimal::ZERO
        } else {
            ((Decimal::from(my_total) - group_avg) / group_avg * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        let mut received = Decimal::ZERO;
        let mut max_limit: i64 = 0;
        for rule in owned_rules {
            received += realized_benefit(totals.total_for(rule.category_id), rule)?;
            max_limit = checked_total(max_limit, rule.cap.unwrap_or(0), "Benefit limit")?;
        }

        let achievement_rate = if max_limit == 0 {
            Decimal::ZERO
        } else {
            (received / Decimal::from(max_limit) * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
                .min(Decimal::ONE_HUNDRED)
        };

        let pattern = ConsumptionPattern {
            owner,
            comparison: SpendingComparison {
                my_total_spent: my_total,
                group_avg_spent: round_to_units(group_avg)?,
                diff_percent,
                percentile: percentile_rank(my_total, peer_totals),
            },
            benefit_status: BenefitStatus {
                total_benefit_received: round_to_units(received)?,
                max_benefit_limit: max_limit,
                achievement_rate,
            },
        };

        tracing::debug!(
            owner,
            my_total,
            peers = peer_totals.len(),
            percentile = pattern.comparison.percentile,
            "Consumption pattern computed"
        );

        Ok(pattern)
    }
}

fn round_to_units(value: Decimal) -> Result<i64> {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    i64::try_from(rounded)
        .map_err(|_| Error::InvalidData(format!("Amount {} does not fit in i64", rounded)))
}
