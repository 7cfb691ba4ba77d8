//! Engine configuration
//!
//! Holds the tunables that product copy or pricing may change without a code
//! change: the annual fee floor, ROI label tiers, recommendation limits and the
//! default analysis window.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, else the override in the data dir
//!    (~/.local/share/cardwise/config/engine.toml) if it exists
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::window::MAX_TRAILING_DAYS;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// One ROI label tier: ratios strictly above `above` get `label`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTier {
    #[serde(with = "rust_decimal::serde::float")]
    pub above: Decimal,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiConfig {
    /// Smallest fee used as the ROI denominator
    pub fee_floor: i64,
    /// Months the benefit total is averaged over
    pub observation_months: u32,
    /// Label when no tier matches
    pub default_label: String,
    /// Sorted by `above` descending
    pub labels: Vec<LabelTier>,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            fee_floor: 1000,
            observation_months: 3,
            default_label: "standard".to_string(),
            labels: vec![LabelTier {
                above: Decimal::ONE_HUNDRED,
                label: "high efficiency".to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub limit: usize,
    pub family_prefix_len: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            limit: 5,
            family_prefix_len: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub trailing_days: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { trailing_days: 90 }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub roi: RoiConfig,
    pub recommendation: RecommendationConfig,
    pub window: WindowConfig,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => write!(f, "embedded defaults"),
        }
    }
}

impl EngineConfig {
    /// Load configuration (explicit path or override first, then default)
    ///
    /// An explicit path that does not exist is an error; a missing data-dir
    /// override silently falls back to the embedded defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                let config = Self::from_file(&default_path)?;
                return Ok((config, ConfigSource::File(default_path)));
            }
        }

        Ok((Self::parse(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse config from TOML content, layering it over the defaults
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(roi) = raw.roi {
            if let Some(floor) = roi.fee_floor {
                config.roi.fee_floor = floor;
            }
            if let Some(months) = roi.observation_months {
                config.roi.observation_months = months;
            }
            if let Some(label) = roi.default_label {
                config.roi.default_label = label;
            }
            if let Some(labels) = roi.labels {
                config.roi.labels = labels
                    .into_iter()
                    .map(|tier| {
                        let above = Decimal::try_from(tier.above).map_err(|e| {
                            Error::Config(format!("Invalid label threshold {}: {}", tier.above, e))
                        })?;
                        Ok(LabelTier {
                            above,
                            label: tier.label,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
            }
        }

        if let Some(rec) = raw.recommendation {
            if let Some(limit) = rec.limit {
                config.recommendation.limit = limit;
            }
            if let Some(len) = rec.family_prefix_len {
                config.recommendation.family_prefix_len = len;
            }
        }

        if let Some(window) = raw.window {
            if let Some(days) = window.trailing_days {
                config.window.trailing_days = days;
            }
        }

        config
            .roi
            .labels
            .sort_by(|a, b| b.above.cmp(&a.above));

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make scoring or selection meaningless
    pub fn validate(&self) -> Result<()> {
        if self.roi.fee_floor <= 0 {
            return Err(Error::Config(format!(
                "roi.fee_floor must be positive, got {}",
                self.roi.fee_floor
            )));
        }
        if self.roi.observation_months == 0 {
            return Err(Error::Config(
                "roi.observation_months must be at least 1".to_string(),
            ));
        }
        if self.recommendation.limit == 0 {
            return Err(Error::Config(
                "recommendation.limit must be at least 1".to_string(),
            ));
        }
        if self.recommendation.family_prefix_len == 0 {
            return Err(Error::Config(
                "recommendation.family_prefix_len must be at least 1".to_string(),
            ));
        }
        if self.window.trailing_days == 0 || self.window.trailing_days > MAX_TRAILING_DAYS {
            return Err(Error::Config(format!(
                "window.trailing_days must be between 1 and {}, got {}",
                MAX_TRAILING_DAYS, self.window.trailing_days
            )));
        }
        Ok(())
    }

    /// Render as TOML (for `cardwise config`)
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("cardwise").join("config").join("engine.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    roi: Option<RawRoi>,
    recommendation: Option<RawRecommendation>,
    window: Option<RawWindow>,
}

#[derive(Debug, Deserialize)]
struct RawRoi {
    fee_floor: Option<i64>,
    observation_months: Option<u32>,
    default_label: Option<String>,
    labels: Option<Vec<RawLabelTier>>,
}

#[derive(Debug, Deserialize)]
struct RawLabelTier {
    above: f64,
    label: String,
}

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    limit: Option<usize>,
    family_prefix_len: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    trailing_days: Option<u32>,
}
