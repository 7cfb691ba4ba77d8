//! Error types for cardwise

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{CardId, CategoryId, UserId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid benefit rule for card {card_id}, category {category_id}: rate {rate} is outside [0, 100]")]
    InvalidRule {
        card_id: CardId,
        category_id: CategoryId,
        rate: Decimal,
    },

    #[error("Invalid window: end {end} is not after start {start}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Negative expense amount {amount} for user {owner}")]
    NegativeAmount { owner: UserId, amount: i64 },

    #[error("Observation period must be at least one month, got {0}")]
    InvalidObservationPeriod(u32),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
