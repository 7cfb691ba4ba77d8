//! Data models for cardwise
//!
//! Input records (expenses, benefit rules, card summaries) are supplied by the
//! caller and never mutated. Result records are derived per analysis call and
//! carry no identity of their own.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type UserId = i64;
pub type CardId = i64;
pub type CategoryId = i64;

/// A single spend event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Amount in whole currency units
    pub amount: i64,
    pub category_id: CategoryId,
    pub occurred_at: DateTime<Utc>,
    pub owner: UserId,
}

impl ExpenseRecord {
    pub fn new(
        owner: UserId,
        category_id: CategoryId,
        amount: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            category_id,
            occurred_at,
            owner,
        }
    }

    /// Reject records with a negative amount
    pub fn validate(&self) -> Result<()> {
        if self.amount < 0 {
            return Err(Error::NegativeAmount {
                owner: self.owner,
                amount: self.amount,
            });
        }
        Ok(())
    }
}

/// A card's benefit for one spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitRule {
    pub card_id: CardId,
    pub category_id: CategoryId,
    /// Percentage of category spend returned, e.g. `1.50` means 1.5%
    pub rate: Decimal,
    /// Maximum benefit this rule can return; `None` means unlimited
    #[serde(default)]
    pub cap: Option<i64>,
}

impl BenefitRule {
    pub fn new(card_id: CardId, category_id: CategoryId, rate: Decimal, cap: Option<i64>) -> Self {
        Self {
            card_id,
            category_id,
            rate,
            cap,
        }
    }

    /// Check the rate lies in [0, 100] and the cap is non-negative
    pub fn validate(&self) -> Result<()> {
        if self.rate < Decimal::ZERO || self.rate > Decimal::ONE_HUNDRED {
            return Err(Error::InvalidRule {
                card_id: self.card_id,
                category_id: self.category_id,
                rate: self.rate,
            });
        }
        if let Some(cap) = self.cap {
            if cap < 0 {
                return Err(Error::InvalidData(format!(
                    "Benefit cap {} for card {} is negative",
                    cap, self.card_id
                )));
            }
        }
        Ok(())
    }
}

/// Reference data describing a card product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSummary {
    pub card_id: CardId,
    pub display_name: String,
    pub issuer: String,
    /// Annual fee in whole currency units
    pub annual_fee: i64,
    #[serde(default)]
    pub image_reference: Option<String>,
    /// Explicit series identifier shared by co-branded variants
    #[serde(default)]
    pub product_family: Option<String>,
}

/// A spending category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
}

/// Ownership link between a user and a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCard {
    pub owner: UserId,
    pub card_id: CardId,
}

/// Total spend in one category over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category_id: CategoryId,
    pub total_amount: i64,
}

/// ROI row for a card the user already owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedCardRoi {
    pub card_id: CardId,
    #[serde(rename = "card_name")]
    pub display_name: String,
    /// Annualized benefit over effective fee, as a percentage (1 decimal)
    #[serde(with = "rust_decimal::serde::float")]
    pub roi_ratio: Decimal,
    /// Average realized benefit per observed month (2 decimals)
    #[serde(rename = "monthly_benefit_avg", with = "rust_decimal::serde::float")]
    pub monthly_benefit_average: Decimal,
    #[serde(rename = "comment")]
    pub classification_label: String,
}

/// A recommended card the user does not own yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub card_id: CardId,
    #[serde(rename = "card_name")]
    pub display_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub benefit_rate: Decimal,
    #[serde(rename = "main_category")]
    pub matched_category: CategoryId,
}

/// Recommendations for the user's dominant category
///
/// `target_category == None` with no cards is the normal "not enough data"
/// outcome, not a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBlock {
    pub target_category: Option<CategoryId>,
    #[serde(default)]
    pub target_category_name: Option<String>,
    #[serde(rename = "cards")]
    pub entries: Vec<RecommendationEntry>,
}

impl RecommendationBlock {
    /// The block returned when there is no spending to derive a category from
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The engine's full output for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sorted by `roi_ratio` descending, then `card_id` ascending
    #[serde(rename = "my_cards")]
    pub owned_card_rois: Vec<OwnedCardRoi>,
    pub recommendations: RecommendationBlock,
}

impl AnalysisResult {
    pub fn target_category(&self) -> Option<CategoryId> {
        self.recommendations.target_category
    }
}

/// How a user's total compares with the peer population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingComparison {
    pub my_total_spent: i64,
    pub group_avg_spent: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub diff_percent: Decimal,
    /// 0..=100, lower means the user spent less than most peers
    pub percentile: u8,
}

/// Benefit collected so far against the sum of the user's caps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitStatus {
    pub total_benefit_received: i64,
    pub max_benefit_limit: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub achievement_rate: Decimal,
}

/// Monthly consumption pattern report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionPattern {
    pub owner: UserId,
    pub comparison: SpendingComparison,
    pub benefit_status: BenefitStatus,
}

/// One row of a monthly expense listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub occurred_at: DateTime<Utc>,
    pub amount: i64,
    pub category_id: CategoryId,
    pub category_name: String,
}

/// A user's expenses for one window with their total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseListing {
    pub owner: UserId,
    pub total_spent: i64,
    #[serde(rename = "expense_list")]
    pub expenses: Vec<ExpenseLine>,
}
