//! Owned-card ROI scoring
//!
//! A card's ROI is its annualized realized benefit over its annual fee, as a
//! percentage. Fees below the configured floor are scored as the floor so
//! zero-fee cards never divide by zero.

use std::cmp::Ordering;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{LabelTier, RoiConfig};
use crate::error::{Error, Result};
use crate::models::{CardSummary, OwnedCardRoi};

const MONTHS_PER_YEAR: i64 = 12;

/// Maps a ROI ratio to the label shown next to it
pub trait RoiClassifier: Send + Sync {
    fn classify(&self, roi_ratio: Decimal) -> String;
}

/// Label tiers read from config: the first tier whose threshold the ratio
/// strictly exceeds wins, otherwise the default label
#[derive(Debug, Clone)]
pub struct ThresholdClassifier {
    tiers: Vec<LabelTier>,
    default_label: String,
}

impl ThresholdClassifier {
    pub fn new(default_label: impl Into<String>, mut tiers: Vec<LabelTier>) -> Self {
        tiers.sort_by(|a, b| b.above.cmp(&a.above));
        Self {
            tiers,
            default_label: default_label.into(),
        }
    }

    pub fn from_config(config: &RoiConfig) -> Self {
        Self::new(config.default_label.clone(), config.labels.clone())
    }
}

impl RoiClassifier for ThresholdClassifier {
    fn classify(&self, roi_ratio: Decimal) -> String {
        self.tiers
            .iter()
            .find(|tier| roi_ratio > tier.above)
            .map(|tier| tier.label.clone())
            .unwrap_or_else(|| self.default_label.clone())
    }
}

/// Scores owned cards against their annual fee
pub struct RoiScorer {
    fee_floor: i64,
    classifier: Box<dyn RoiClassifier>,
}

impl RoiScorer {
    pub fn new(fee_floor: i64, classifier: Box<dyn RoiClassifier>) -> Self {
        Self {
            fee_floor,
            classifier,
        }
    }

    pub fn from_config(config: &RoiConfig) -> Self {
        Self::new(
            config.fee_floor,
            Box::new(ThresholdClassifier::from_config(config)),
        )
    }

    /// Replace the label classifier
    pub fn set_classifier(&mut self, classifier: Box<dyn RoiClassifier>) {
        self.classifier = classifier;
    }

    pub fn fee_floor(&self) -> i64 {
        self.fee_floor
    }

    /// Fee used as the ROI denominator
    pub fn effective_fee(&self, annual_fee: i64) -> i64 {
        annual_fee.max(self.fee_floor)
    }

    /// Score one card from the realized benefit of each of its rules
    pub fn score(
        &self,
        card: &CardSummary,
        realized_benefits: &[Decimal],
        observation_months: u32,
    ) -> Result<OwnedCardRoi> {
        if observation_months == 0 {
            return Err(Error::InvalidObservationPeriod(observation_months));
        }

        let total: Decimal = realized_benefits.iter().copied().sum();
        let months = Decimal::from(observation_months);
        let fee = Decimal::from(self.effective_fee(card.annual_fee));

        let monthly_average = total / months;
        // (total / months * 12) / fee * 100, folded into one division
        let roi_ratio = total * Decimal::from(MONTHS_PER_YEAR * 100) / (months * fee);
        let roi_ratio = roi_ratio.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);

        Ok(OwnedCardRoi {
            card_id: card.card_id,
            display_name: card.display_name.clone(),
            roi_ratio,
            monthly_benefit_average: monthly_average
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            classification_label: self.classifier.classify(roi_ratio),
        })
    }
}

/// ROI descending, then card id ascending
pub fn compare_by_roi(a: &OwnedCardRoi, b: &OwnedCardRoi) -> Ordering {
    b.roi_ratio
        .cmp(&a.roi_ratio)
        .then_with(|| a.card_id.cmp(&b.card_id))
}
