//! Realized benefit for a single rule

use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::BenefitRule;

/// Benefit a rule returns on `category_total` of spend
///
/// `total * rate / 100`, limited to the rule's cap when it has one. The rate
/// check is cheap but callers should still validate the catalog up front
/// rather than lean on it.
pub fn realized_benefit(category_total: i64, rule: &BenefitRule) -> Result<Decimal> {
    rule.validate()?;

    let raw = Decimal::from(category_total) * rule.rate / Decimal::ONE_HUNDRED;

    Ok(match rule.cap {
        Some(cap) => raw.min(Decimal::from(cap)),
        None => raw,
    })
}
