//! Recommendation selection
//!
//! Picks unowned cards with the best rate for a target category. Co-branded
//! variants of one product are collapsed so the list shows distinct products:
//! cards sharing a declared `product_family` are one family, and cards without
//! one fall back to a name heuristic (whitespace stripped, first N characters).
//! A declared family always takes precedence over the name heuristic.

use std::collections::HashSet;

use crate::catalog::Candidate;
use crate::config::RecommendationConfig;
use crate::models::{CardId, CardSummary, CategoryId, RecommendationEntry};

/// Grouping key for co-branded card variants
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FamilyKey {
    /// Family declared in the catalog
    Declared(String),
    /// Leading characters of the whitespace-stripped display name
    NamePrefix(String),
}

impl FamilyKey {
    pub fn for_card(card: &CardSummary, prefix_len: usize) -> Self {
        match card.product_family.as_deref().map(str::trim) {
            Some(family) if !family.is_empty() => FamilyKey::Declared(family.to_string()),
            _ => FamilyKey::NamePrefix(name_prefix(&card.display_name, prefix_len)),
        }
    }
}

/// First `len` characters of `name` with all whitespace removed
pub fn name_prefix(name: &str, len: usize) -> String {
    name.chars().filter(|c| !c.is_whitespace()).take(len).collect()
}

#[derive(Debug, Clone)]
pub struct RecommendationSelector {
    limit: usize,
    family_prefix_len: usize,
}

impl Default for RecommendationSelector {
    fn default() -> Self {
        Self::from_config(&RecommendationConfig::default())
    }
}

impl RecommendationSelector {
    pub fn new(limit: usize, family_prefix_len: usize) -> Self {
        Self {
            limit,
            family_prefix_len,
        }
    }

    pub fn from_config(config: &RecommendationConfig) -> Self {
        Self::new(config.limit, config.family_prefix_len)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank candidates for `target`, skipping owned cards and repeat families
    pub fn select(
        &self,
        candidates: &[Candidate<'_>],
        target: CategoryId,
        owned: &HashSet<CardId>,
    ) -> Vec<RecommendationEntry> {
        let mut ranked: Vec<&Candidate<'_>> = candidates
            .iter()
            .filter(|c| c.rule.category_id == target)
            .collect();

        ranked.sort_by(|a, b| {
            b.rule
                .rate
                .cmp(&a.rule.rate)
                .then_with(|| a.card.card_id.cmp(&b.card.card_id))
        });

        let mut seen_cards: HashSet<CardId> = HashSet::new();
        let mut seen_families: HashSet<FamilyKey> = HashSet::new();
        let mut entries = Vec::with_capacity(self.limit.min(ranked.len()));

        for candidate in ranked {
            if entries.len() >= self.limit {
                break;
            }

            let card = candidate.card;
            if owned.contains(&card.card_id) {
                continue;
            }
            // A card listing the same category twice is still one card
            if !seen_cards.insert(card.card_id) {
                continue;
            }

            let family = FamilyKey::for_card(card, self.family_prefix_len);
            if !seen_families.insert(family) {
                tracing::debug!(
                    card_id = card.card_id,
                    name = %card.display_name,
                    "Skipping variant of an already recommended product"
                );
                continue;
            }

            entries.push(RecommendationEntry {
                card_id: card.card_id,
                display_name: card.display_name.clone(),
                benefit_rate: candidate.rule.rate,
                matched_category: target,
            });
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BenefitRule;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn card(id: CardId, name: &str) -> CardSummary {
        CardSummary {
            card_id: id,
            display_name: name.to_string(),
            issuer: "Issuer".to_string(),
            annual_fee: 10_000,
            image_reference: None,
            product_family: None,
        }
    }

    fn candidates<'a>(rules: &'a [BenefitRule], cards: &'a [CardSummary]) -> Vec<Candidate<'a>> {
        rules
            .iter()
            .map(|rule| Candidate {
                rule,
                card: cards.iter().find(|c| c.card_id == rule.card_id).unwrap(),
            })
            .collect()
    }

    fn ids(entries: &[RecommendationEntry]) -> Vec<CardId> {
        entries.iter().map(|e| e.card_id).collect()
    }

    #[test]
    fn test_name_prefix() {
        assert_eq!(name_prefix("ABC Platinum", 7), "ABCPlat");
        assert_eq!(name_prefix("ABC Platinum Plus", 7), "ABCPlat");
        assert_eq!(name_prefix(" A\tB ", 7), "AB");
        // characters, not bytes
        assert_eq!(name_prefix("신한카드 구독 좋아요", 7), "신한카드구독좋");
    }

    #[test]
    fn test_declared_family_wins() {
        let mut a = card(1, "Totally Different");
        a.product_family = Some("sky".to_string());
        let mut b = card(2, "Another Name");
        b.product_family = Some("sky".to_string());
        assert_eq!(FamilyKey::for_card(&a, 7), FamilyKey::for_card(&b, 7));

        // Blank family falls back to the name heuristic
        let mut c = card(3, "ABC Platinum");
        c.product_family = Some("  ".to_string());
        assert_eq!(
            FamilyKey::for_card(&c, 7),
            FamilyKey::NamePrefix("ABCPlat".to_string())
        );
    }

    #[test]
    fn test_filters_and_ranks_by_rate() {
        let cards = vec![card(1, "Alpha"), card(2, "Bravo"), card(3, "Charlie")];
        let rules = vec![
            BenefitRule::new(1, 10, dec!(1.5), None),
            BenefitRule::new(2, 10, dec!(3), None),
            BenefitRule::new(3, 20, dec!(9), None),
        ];
        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 10, &HashSet::new());
        assert_eq!(ids(&selected), vec![2, 1]);
        assert!(selected.iter().all(|e| e.matched_category == 10));
        assert_eq!(selected[0].benefit_rate, dec!(3));
    }

    #[test]
    fn test_rate_ties_broken_by_card_id() {
        let cards = vec![card(8, "Hotel"), card(3, "Golf"), card(5, "India")];
        let rules = vec![
            BenefitRule::new(8, 1, dec!(2), None),
            BenefitRule::new(3, 1, dec!(2), None),
            BenefitRule::new(5, 1, dec!(2), None),
        ];
        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 1, &HashSet::new());
        assert_eq!(ids(&selected), vec![3, 5, 8]);
    }

    #[test]
    fn test_owned_cards_excluded() {
        let cards = vec![card(1, "Alpha"), card(2, "Bravo"), card(3, "Charlie")];
        let rules = vec![
            BenefitRule::new(1, 1, dec!(5), None),
            BenefitRule::new(2, 1, dec!(4), None),
            BenefitRule::new(3, 1, dec!(3), None),
        ];
        let owned: HashSet<CardId> = [1, 3].into_iter().collect();
        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 1, &owned);
        assert_eq!(ids(&selected), vec![2]);
    }

    #[test]
    fn test_family_dedup_keeps_highest_rate() {
        let cards = vec![card(1, "ABC Platinum"), card(2, "ABC Platinum Plus")];
        let rules = vec![
            BenefitRule::new(1, 1, dec!(3), None),
            BenefitRule::new(2, 1, dec!(5), None),
        ];
        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 1, &HashSet::new());
        assert_eq!(ids(&selected), vec![2]);
        assert_eq!(selected[0].benefit_rate, dec!(5));
    }

    #[test]
    fn test_owned_variant_does_not_block_family() {
        // The owned card is skipped before it claims its family
        let cards = vec![card(1, "ABC Platinum"), card(2, "ABC Platinum Plus")];
        let rules = vec![
            BenefitRule::new(2, 1, dec!(5), None),
            BenefitRule::new(1, 1, dec!(3), None),
        ];
        let owned: HashSet<CardId> = [2].into_iter().collect();
        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 1, &owned);
        assert_eq!(ids(&selected), vec![1]);
    }

    #[test]
    fn test_duplicate_rules_for_one_card() {
        let cards = vec![card(1, "Alpha"), card(2, "Bravo")];
        let rules = vec![
            BenefitRule::new(1, 1, dec!(2), None),
            BenefitRule::new(1, 1, dec!(4), None),
            BenefitRule::new(2, 1, dec!(3), None),
        ];
        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 1, &HashSet::new());
        assert_eq!(ids(&selected), vec![1, 2]);
        assert_eq!(selected[0].benefit_rate, dec!(4));
    }

    #[test]
    fn test_limit_applies() {
        // Names differ within the first 7 characters
        let cards: Vec<_> = (1..=8).map(|i| card(i, &format!("{} Card", i))).collect();
        let rules: Vec<_> = (1..=8)
            .map(|i| BenefitRule::new(i, 1, Decimal::from(i), None))
            .collect();

        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 1, &HashSet::new());
        assert_eq!(ids(&selected), vec![8, 7, 6, 5, 4]);

        let selected =
            RecommendationSelector::new(2, 7).select(&candidates(&rules, &cards), 1, &HashSet::new());
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_no_candidates_for_category() {
        let cards = vec![card(1, "Alpha")];
        let rules = vec![BenefitRule::new(1, 1, dec!(2), None)];
        let selected =
            RecommendationSelector::default().select(&candidates(&rules, &cards), 99, &HashSet::new());
        assert!(selected.is_empty());
    }
}
