//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_snapshot, load_config, resolve_window) and config
//! - `analysis` - Owned-card ROI analysis and recommendations
//! - `pattern` - Monthly consumption pattern report
//! - `cards` - Owned card listing
//! - `expenses` - Monthly expense listing

pub mod analysis;
pub mod cards;
pub mod core;
pub mod expenses;
pub mod pattern;

// Re-export command functions for main.rs
pub use analysis::*;
pub use cards::*;
pub use core::*;
pub use expenses::*;
pub use pattern::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
