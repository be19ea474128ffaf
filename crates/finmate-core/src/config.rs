//! Analytics configuration
//!
//! Thresholds, weights and display settings for the analytics functions.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/finmate/config/analytics.toml)
//!    or an explicit path
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Longest accepted month-over-month comparison window
pub const MAX_COMPARISON_WINDOW_DAYS: i64 = 3650;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Settings consumed by insights, health score, limits and export
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsConfig {
    /// Symbol prefixed to amounts in human-readable text
    pub currency_symbol: String,
    /// Offset used for CSV date/time columns and calendar weeks
    pub utc_offset_minutes: i32,
    /// Maximum number of insight cards returned
    pub max_cards: usize,
    /// Combined subscription spend that triggers a review card
    pub subscription_threshold: f64,
    /// Savings rate (percent) below which the savings card is a warning
    pub savings_rate_target: f64,
    /// Month-over-month change (percent) that counts as notable
    pub month_change_threshold: f64,
    /// Length of each month-over-month comparison window
    pub comparison_window_days: i64,
    /// Spend/limit ratio at which a limit is flagged as near
    pub warning_ratio: f64,
    pub savings_weight: f64,
    pub limit_weight: f64,
    pub challenge_weight: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            utc_offset_minutes: 330,
            max_cards: 4,
            subscription_threshold: 500.0,
            savings_rate_target: 20.0,
            month_change_threshold: 10.0,
            comparison_window_days: 30,
            warning_ratio: 0.8,
            savings_weight: 0.4,
            limit_weight: 0.4,
            challenge_weight: 0.2,
        }
    }
}

impl AnalyticsConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path, falling back to embedded defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document over the built-in defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Fixed offset for rendering local dates (UTC if out of range)
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Format an amount rounded to whole units ("₹1250")
    pub fn whole(&self, amount: f64) -> String {
        format!("{}{:.0}", self.currency_symbol, amount.round())
    }

    /// Format an amount with two decimals ("₹1250.50")
    pub fn exact(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }

    fn validate(&self) -> Result<()> {
        let total = self.savings_weight + self.limit_weight + self.challenge_weight;
        if (total - 1.0).abs() > 0.001 {
            return Err(Error::Config(format!(
                "Health score weights must sum to 1.0 (got {:.3})",
                total
            )));
        }
        if self.comparison_window_days <= 0 {
            return Err(Error::Config(
                "comparison_window_days must be positive".to_string(),
            ));
        }
        if self.comparison_window_days > MAX_COMPARISON_WINDOW_DAYS {
            return Err(Error::Config(format!(
                "comparison_window_days must be at most {} (got {})",
                MAX_COMPARISON_WINDOW_DAYS, self.comparison_window_days
            )));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finmate").join("config").join("analytics.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AnalyticsConfig> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(default_config_path);

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading analytics config");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    display: Option<RawDisplay>,
    insights: Option<RawInsights>,
    limits: Option<RawLimits>,
    health: Option<RawHealth>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
    utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    max_cards: Option<usize>,
    subscription_threshold: Option<f64>,
    savings_rate_target: Option<f64>,
    month_change_threshold: Option<f64>,
    comparison_window_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawLimits {
    warning_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawHealth {
    savings_weight: Option<f64>,
    limit_weight: Option<f64>,
    challenge_weight: Option<f64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(display) = raw.display {
        if let Some(symbol) = display.currency_symbol {
            config.currency_symbol = symbol;
        }
        if let Some(offset) = display.utc_offset_minutes {
            config.utc_offset_minutes = offset;
        }
    }

    if let Some(insights) = raw.insights {
        if let Some(max) = insights.max_cards {
            config.max_cards = max;
        }
        if let Some(threshold) = insights.subscription_threshold {
            config.subscription_threshold = threshold;
        }
        if let Some(target) = insights.savings_rate_target {
            config.savings_rate_target = target;
        }
        if let Some(threshold) = insights.month_change_threshold {
            config.month_change_threshold = threshold;
        }
        if let Some(days) = insights.comparison_window_days {
            config.comparison_window_days = days;
        }
    }

    if let Some(limits) = raw.limits {
        if let Some(ratio) = limits.warning_ratio {
            config.warning_ratio = ratio;
        }
    }

    if let Some(health) = raw.health {
        if let Some(w) = health.savings_weight {
            config.savings_weight = w;
        }
        if let Some(w) = health.limit_weight {
            config.limit_weight = w;
        }
        if let Some(w) = health.challenge_weight {
            config.challenge_weight = w;
        }
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_builtin() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AnalyticsConfig::from_toml(
            r#"
[display]
currency_symbol = "$"

[insights]
max_cards = 2
"#,
        )
        .unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.max_cards, 2);
        // Untouched keys keep defaults
        assert_eq!(config.subscription_threshold, 500.0);
        assert_eq!(config.savings_weight, 0.4);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let result = AnalyticsConfig::from_toml(
            r#"
[health]
savings_weight = 0.5
"#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_comparison_window_bounds() {
        let huge = AnalyticsConfig::from_toml("[insights]\ncomparison_window_days = 9000000000000");
        assert!(matches!(huge, Err(Error::Config(_))));

        let zero = AnalyticsConfig::from_toml("[insights]\ncomparison_window_days = 0");
        assert!(matches!(zero, Err(Error::Config(_))));

        let ten_years = AnalyticsConfig::from_toml("[insights]\ncomparison_window_days = 3650");
        assert_eq!(ten_years.unwrap().comparison_window_days, MAX_COMPARISON_WINDOW_DAYS);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(AnalyticsConfig::from_toml("[display").is_err());
    }

    #[test]
    fn test_missing_override_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalyticsConfig::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.toml");
        std::fs::write(&path, "[limits]\nwarning_ratio = 0.9\n").unwrap();
        let config = AnalyticsConfig::load_from(&path).unwrap();
        assert_eq!(config.warning_ratio, 0.9);
    }

    #[test]
    fn test_currency_formatting() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.whole(99.6), "₹100");
        assert_eq!(config.exact(1250.5), "₹1250.50");
    }
}
