//! Repository interfaces
//!
//! Storage sits behind these traits and hands the engine plain collections.
//! All aggregation stays in the engine, so a backend only has to filter and
//! return records.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::models::{BenefitRule, CardSummary, ExpenseRecord, UserId};
use crate::window::SpendingWindow;

pub trait ExpenseRepository {
    /// The owner's expense records within `window`
    fn expenses_for(&self, owner: UserId, window: &SpendingWindow) -> Result<Vec<ExpenseRecord>>;

    /// One total per user with spend in `window`
    fn peer_totals(&self, window: &SpendingWindow) -> Result<Vec<i64>>;
}

pub trait CardRepository {
    /// Cards the user holds
    fn owned_cards(&self, owner: UserId) -> Result<Vec<CardSummary>>;

    /// The full active catalog
    fn catalog(&self) -> Result<Catalog>;

    /// Benefit rules for the cards the user holds
    fn owned_rules(&self, owner: UserId) -> Result<Vec<BenefitRule>> {
        let catalog = self.catalog()?;
        let mut rules = Vec::new();
        for card in self.owned_cards(owner)? {
            rules.extend(catalog.rules_for_card(card.card_id).cloned());
        }
        Ok(rules)
    }
}
