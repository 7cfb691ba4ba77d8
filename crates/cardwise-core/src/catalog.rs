//! Card catalog snapshot
//!
//! The catalog is read-only reference data: every card product, every active
//! benefit rule, and category display names. It is validated once when built
//! so the engine's hot paths can rely on well-formed rules.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::{BenefitRule, CardId, CardSummary, Category, CategoryId};

/// A benefit rule joined with the card it belongs to
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub rule: &'a BenefitRule,
    pub card: &'a CardSummary,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: BTreeMap<CategoryId, String>,
    cards: BTreeMap<CardId, CardSummary>,
    rules: Vec<BenefitRule>,
}

impl Catalog {
    /// Build a catalog, validating every card and rule
    pub fn new(
        categories: Vec<Category>,
        cards: Vec<CardSummary>,
        rules: Vec<BenefitRule>,
    ) -> Result<Self> {
        let catalog = Self {
            categories: categories
                .into_iter()
                .map(|c| (c.category_id, c.name))
                .collect(),
            cards: cards.into_iter().map(|c| (c.card_id, c)).collect(),
            rules,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check fees and rule rates/caps across the whole catalog
    pub fn validate(&self) -> Result<()> {
        for card in self.cards.values() {
            if card.annual_fee < 0 {
                return Err(Error::InvalidData(format!(
                    "Card {} has a negative annual fee",
                    card.card_id
                )));
            }
        }
        for rule in &self.rules {
            rule.validate()?;
        }
        Ok(())
    }

    pub fn card(&self, card_id: CardId) -> Option<&CardSummary> {
        self.cards.get(&card_id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardSummary> {
        self.cards.values()
    }

    pub fn rules(&self) -> &[BenefitRule] {
        &self.rules
    }

    pub fn category_name(&self, category_id: CategoryId) -> Option<&str> {
        self.categories.get(&category_id).map(String::as_str)
    }

    /// All rules attached to one card
    pub fn rules_for_card(&self, card_id: CardId) -> impl Iterator<Item = &BenefitRule> {
        self.rules.iter().filter(move |r| r.card_id == card_id)
    }

    /// Rules joined with their card summaries
    ///
    /// Rules that reference a card missing from the catalog cannot be
    /// recommended (there is nothing to display) and are skipped.
    pub fn candidates(&self) -> Vec<Candidate<'_>> {
        self.rules
            .iter()
            .filter_map(|rule| match self.cards.get(&rule.card_id) {
                Some(card) => Some(Candidate { rule, card }),
                None => {
                    tracing::warn!(
                        card_id = rule.card_id,
                        category_id = rule.category_id,
                        "Benefit rule references unknown card, skipping"
                    );
                    None
                }
            })
            .collect()
    }
}
