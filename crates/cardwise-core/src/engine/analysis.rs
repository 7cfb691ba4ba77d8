//! Analysis orchestrator - composes aggregation, benefit, ROI and
//! recommendation into one result
//!
//! The orchestrator performs no I/O: every input is an already-materialized
//! collection, and the same inputs always produce the same result. It holds
//! only read-only settings, so one instance can serve concurrent callers.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::models::{
    AnalysisResult, BenefitRule, CardId, CardSummary, ExpenseRecord, OwnedCardRoi,
    RecommendationBlock,
};
use crate::window::SpendingWindow;

use super::aggregate::{aggregate, SpendingTotals};
use super::benefit::realized_benefit;
use super::recommend::RecommendationSelector;
use super::roi::{compare_by_roi, RoiClassifier, RoiScorer};

pub struct AnalysisOrchestrator {
    scorer: RoiScorer,
    selector: RecommendationSelector,
    observation_months: u32,
}

impl AnalysisOrchestrator {
    /// Build from config, labelling ROI with the configured tiers
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            scorer: RoiScorer::from_config(&config.roi),
            selector: RecommendationSelector::from_config(&config.recommendation),
            observation_months: config.roi.observation_months,
        }
    }

    /// Use a different ROI label classifier
    pub fn with_classifier(mut self, classifier: Box<dyn RoiClassifier>) -> Self {
        self.scorer.set_classifier(classifier);
        self
    }

    /// Override the months the benefit total is averaged over
    pub fn with_observation_months(mut self, months: u32) -> Result<Self> {
        if months == 0 {
            return Err(Error::InvalidObservationPeriod(months));
        }
        self.observation_months = months;
        Ok(self)
    }

    pub fn observation_months(&self) -> u32 {
        self.observation_months
    }

    /// Full analysis: ROI table for owned cards plus recommendations for the
    /// dominant category
    pub fn analyze(
        &self,
        owned_cards: &[CardSummary],
        owned_rules: &[BenefitRule],
        catalog: &Catalog,
        expenses: &[ExpenseRecord],
        window: &SpendingWindow,
    ) -> Result<AnalysisResult> {
        for rule in owned_rules {
            rule.validate()?;
        }

        let totals = aggregate(expenses, window)?;
        let owned_card_rois = self.score_owned(owned_cards, owned_rules, &totals)?;

        let owned_ids: HashSet<CardId> = owned_cards.iter().map(|c| c.card_id).collect();
        let recommendations = self.recommend_from_totals(&totals, &owned_ids, catalog);

        tracing::info!(
            owned_cards = owned_card_rois.len(),
            target_category = ?recommendations.target_category,
            recommendations = recommendations.entries.len(),
            "Card analysis complete"
        );

        Ok(AnalysisResult {
            owned_card_rois,
            recommendations,
        })
    }

    /// Recommendations only, for the category the user spends most on
    pub fn recommend(
        &self,
        owned_card_ids: &HashSet<CardId>,
        catalog: &Catalog,
        expenses: &[ExpenseRecord],
        window: &SpendingWindow,
    ) -> Result<RecommendationBlock> {
        let totals = aggregate(expenses, window)?;
        Ok(self.recommend_from_totals(&totals, owned_card_ids, catalog))
    }

    /// Score every owned card, sorted by ROI descending
    ///
    /// Each card's rules are matched against the window's category totals;
    /// categories with no spend count as zero.
    fn score_owned(
        &self,
        owned_cards: &[CardSummary],
        owned_rules: &[BenefitRule],
        totals: &SpendingTotals,
    ) -> Result<Vec<OwnedCardRoi>> {
        let mut rows = Vec::with_capacity(owned_cards.len());

        for card in owned_cards {
            let benefits = owned_rules
                .iter()
                .filter(|rule| rule.card_id == card.card_id)
                .map(|rule| realized_benefit(totals.total_for(rule.category_id), rule))
                .collect::<Result<Vec<_>>>()?;

            let row = self.scorer.score(card, &benefits, self.observation_months)?;
            tracing::debug!(
                card_id = card.card_id,
                rules = benefits.len(),
                roi_ratio = %row.roi_ratio,
                "Scored owned card"
            );
            rows.push(row);
        }

        rows.sort_by(compare_by_roi);
        Ok(rows)
    }

    fn recommend_from_totals(
        &self,
        totals: &SpendingTotals,
        owned_ids: &HashSet<CardId>,
        catalog: &Catalog,
    ) -> RecommendationBlock {
        let Some(target) = totals.dominant_category() else {
            tracing::debug!("No spending in window, skipping recommendations");
            return RecommendationBlock::empty();
        };

        let candidates = catalog.candidates();
        let entries = self.selector.select(&candidates, target, owned_ids);

        RecommendationBlock {
            target_category: Some(target),
            target_category_name: catalog.category_name(target).map(str::to_string),
            entries,
        }
    }
}
