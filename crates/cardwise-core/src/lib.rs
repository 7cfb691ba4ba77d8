//! cardwise Core Library
//!
//! Card benefit efficiency analysis and recommendations:
//! - Data model for expenses, benefit rules and card summaries
//! - Analysis windows (calendar months, trailing periods)
//! - The engine: aggregation, benefit, ROI, recommendation, orchestration
//! - Engine configuration with file override
//! - Repository interfaces and a JSON/CSV snapshot implementation

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;
pub mod snapshot;
pub mod window;

pub use catalog::{Candidate, Catalog};
pub use config::{ConfigSource, EngineConfig};
pub use engine::{AnalysisOrchestrator, ConsumptionAnalyzer, RoiClassifier, ThresholdClassifier};
pub use error::{Error, Result};
pub use models::{
    AnalysisResult, BenefitRule, CardSummary, Category, ConsumptionPattern, ExpenseLine,
    ExpenseListing, ExpenseRecord, OwnedCardRoi, RecommendationBlock, RecommendationEntry,
};
pub use repository::{CardRepository, ExpenseRepository};
pub use snapshot::Snapshot;
pub use window::SpendingWindow;
