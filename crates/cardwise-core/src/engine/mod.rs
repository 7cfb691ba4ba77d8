//! Card Benefit Efficiency & Recommendation Engine
//!
//! Pure, stateless computations over in-memory records:
//!
//! - **Aggregation** - per-category totals, dominant category, percentile rank
//! - **Benefit** - realized benefit of one rule, honoring its cap
//! - **ROI** - annualized benefit against the annual fee, with a label
//! - **Recommendation** - best unowned cards for a category, one per product family
//! - **Analysis** - composes the above into one result per user
//! - **Pattern** - monthly spend vs. peers and benefit achievement
//! - **Listing** - one month's expenses with their total
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardwise_core::engine::AnalysisOrchestrator;
//!
//! let orchestrator = AnalysisOrchestrator::new(&config);
//! let result = orchestrator.analyze(&owned, &owned_rules, &catalog, &expenses, &window)?;
//! ```

pub mod aggregate;
pub mod analysis;
pub mod benefit;
pub mod listing;
pub mod pattern;
pub mod recommend;
pub mod roi;

pub use aggregate::{aggregate, dominant_category, percentile_rank, SpendingTotals};
pub use analysis::AnalysisOrchestrator;
pub use benefit::realized_benefit;
pub use listing::list_expenses;
pub use pattern::ConsumptionAnalyzer;
pub use recommend::{name_prefix, FamilyKey, RecommendationSelector};
pub use roi::{compare_by_roi, RoiClassifier, RoiScorer, ThresholdClassifier};
