//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init and shared utilities (open_ledger, load_config, LedgerView)
//! - `transactions` - Record, list, balance
//! - `budget` - Spending limits and challenges
//! - `analytics` - Report, insights, health score, weekly comparison
//! - `export` - CSV export
//! - `chat` - Finance assistant
//! - `prefs` - Notification toggles and category overrides

pub mod analytics;
pub mod budget;
pub mod chat;
pub mod core;
pub mod export;
pub mod prefs;
pub mod transactions;

// Re-export command functions for main.rs
pub use analytics::*;
pub use budget::*;
pub use chat::*;
pub use self::core::*;
pub use export::*;
pub use prefs::*;
pub use transactions::*;

use anyhow::Result;
use finmate_core::Period;
use serde::Serialize;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parse a `--period` value
pub fn parse_period(s: &str) -> Result<Period> {
    s.parse().map_err(|e: String| anyhow::anyhow!(e))
}

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
