//! Domain models for FinMate

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Categories offered when recording a transaction or setting a limit
pub const CATEGORIES: [&str; 10] = [
    "Food",
    "Clothes",
    "College Expenses",
    "Travel",
    "Subscriptions",
    "Bills",
    "EMI",
    "Investments",
    "Recharge",
    "Others",
];

const NANOS_PER_MILLI: i64 = 1_000_000;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Outgoing money (expense)
    Debit,
    /// Incoming money (income)
    Credit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "expense" => Ok(Self::Debit),
            "credit" | "income" => Ok(Self::Credit),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger transaction (read-only copy held by the client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    pub payment_method: String,
    /// Nanoseconds since the Unix epoch
    pub timestamp: i64,
}

impl Transaction {
    pub fn new(
        amount: f64,
        kind: TransactionType,
        category: impl Into<String>,
        description: impl Into<String>,
        payment_method: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            amount,
            kind,
            category: category.into(),
            description: description.into(),
            payment_method: payment_method.into(),
            timestamp,
        }
    }

    /// Replace the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the payment method
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = payment_method.into();
        self
    }

    pub fn is_debit(&self) -> bool {
        self.kind == TransactionType::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.kind == TransactionType::Credit
    }

    /// Timestamp truncated to milliseconds
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp / NANOS_PER_MILLI
    }

    /// Timestamp as a UTC datetime
    pub fn datetime(&self) -> DateTime<Utc> {
        Utc.timestamp_nanos(self.timestamp)
    }
}

/// Convert a datetime to the ledger's nanosecond timestamp representation
pub fn to_timestamp_nanos(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_nanos_opt()
        .unwrap_or_else(|| dt.timestamp_millis().saturating_mul(NANOS_PER_MILLI))
}

/// A per-category monthly budget cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingLimit {
    pub category: String,
    pub limit: f64,
}

impl SpendingLimit {
    pub fn new(category: impl Into<String>, limit: f64) -> Self {
        Self {
            category: category.into(),
            limit,
        }
    }
}

/// A gamified saving challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: u64,
    pub description: String,
    pub target_amount: f64,
    pub reward_points: u64,
    pub completed: bool,
}

/// Trailing time window anchored at "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Trailing 7 days
    Weekly,
    /// Trailing 30 days
    #[default]
    Monthly,
    /// Trailing 365 days
    Yearly,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Length of the trailing window
    pub fn window(&self) -> Duration {
        match self {
            Self::Weekly => Duration::days(7),
            Self::Monthly => Duration::days(30),
            Self::Yearly => Duration::days(365),
        }
    }

    /// Narrative label used in insight descriptions ("this month")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekly => "this week",
            Self::Monthly => "this month",
            Self::Yearly => "this year",
        }
    }

    pub fn all() -> &'static [Period] {
        &[Self::Weekly, Self::Monthly, Self::Yearly]
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" => Ok(Self::Yearly),
            _ => Err(format!(
                "Unknown period: {}. Available: weekly, monthly, yearly",
                s
            )),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of an insight card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Icon tag rendered next to an insight card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsightIcon {
    AlertTriangle,
    TrendingUp,
    RefreshCw,
    PiggyBank,
    CheckCircle,
    PlusCircle,
    BarChart2,
}

/// A derived, human-readable observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCard {
    pub title: String,
    pub description: String,
    pub icon: InsightIcon,
    pub severity: Severity,
}

impl InsightCard {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        icon: InsightIcon,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon,
            severity,
        }
    }
}

/// Qualitative band for a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HealthLabel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthLabel {
    /// Band for a score; lower bounds are inclusive
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }

    /// Display hint for the UI layer
    pub fn color(&self) -> &'static str {
        match self {
            Self::Poor => "text-red-500",
            Self::Fair => "text-yellow-500",
            Self::Good => "text-green-500",
            Self::Excellent => "text-teal-500",
        }
    }
}

impl std::fmt::Display for HealthLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Financial health score (0-100) with its band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: u8,
    pub label: HealthLabel,
    pub color: String,
}

impl HealthScore {
    pub fn from_score(score: u8) -> Self {
        let label = HealthLabel::from_score(score);
        Self {
            score,
            label,
            color: label.color().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_serde_uses_ledger_field_names() {
        let json = r#"{
            "amount": 12.5,
            "type": "debit",
            "category": "Food",
            "description": "Lunch",
            "paymentMethod": "qr",
            "timestamp": 1700000000000000000
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.kind, TransactionType::Debit);
        assert_eq!(tx.payment_method, "qr");
        assert_eq!(tx.timestamp_millis(), 1_700_000_000_000);

        let out = serde_json::to_value(&tx).unwrap();
        assert_eq!(out["type"], "debit");
        assert_eq!(out["paymentMethod"], "qr");
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!(Period::from_str("weekly").unwrap(), Period::Weekly);
        assert_eq!(Period::from_str("Month").unwrap(), Period::Monthly);
        assert_eq!(Period::from_str(" year ").unwrap(), Period::Yearly);
        assert!(Period::from_str("daily").is_err());
        assert_eq!(Period::Yearly.window(), Duration::days(365));
    }

    #[test]
    fn test_health_label_bands_are_contiguous() {
        for score in 0..=100u8 {
            let label = HealthLabel::from_score(score);
            let expected = if score >= 80 {
                HealthLabel::Excellent
            } else if score >= 60 {
                HealthLabel::Good
            } else if score >= 40 {
                HealthLabel::Fair
            } else {
                HealthLabel::Poor
            };
            assert_eq!(label, expected, "score {}", score);
        }
        assert_eq!(HealthLabel::from_score(80), HealthLabel::Excellent);
        assert_eq!(HealthLabel::from_score(79), HealthLabel::Good);
        assert_eq!(HealthLabel::from_score(40), HealthLabel::Fair);
        assert_eq!(HealthLabel::from_score(39), HealthLabel::Poor);
    }

    #[test]
    fn test_insight_icon_serializes_as_tag() {
        let card = InsightCard::new("t", "d", InsightIcon::BarChart2, Severity::Info);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["icon"], "BarChart2");
        assert_eq!(json["severity"], "info");
    }
}
