//! FinMate Core Library
//!
//! Analytics for the FinMate student finance tracker:
//! - Period filters over trailing week/month/year windows
//! - Category and income/expense aggregation
//! - Insight cards (overspending, subscriptions, savings rate, month-over-month)
//! - Financial health score
//! - CSV export
//! - Keyword chatbot over the current data snapshot
//! - Ledger and preference-store seams for the data the analytics consume

pub mod aggregate;
pub mod chatbot;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod health;
pub mod insights;
pub mod ledger;
pub mod models;
pub mod preferences;
pub mod report;

/// Test utilities: builders for transactions, limits and challenges
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{
    category_matches, category_totals, humanize_category, income_expense, limit_statuses,
    weekly_comparison, CategoryTotal, IncomeExpense, LimitStatus, WeeklyComparison,
};
pub use chatbot::{respond, ChatContext};
pub use config::AnalyticsConfig;
pub use error::{Error, Result};
pub use export::export_transactions_csv;
pub use filter::{filter_by_period, search};
pub use health::{calculate_health_score, HealthBreakdown};
pub use insights::{generate_insight_cards, InsightRule};
pub use ledger::{Ledger, LedgerSnapshot, SnapshotLedger};
pub use models::{
    Challenge, HealthLabel, HealthScore, InsightCard, InsightIcon, Period, Severity,
    SpendingLimit, Transaction, TransactionType, CATEGORIES,
};
pub use preferences::{
    CategoryOverrides, FilePreferenceStore, MemoryPreferenceStore, NotificationPreferences,
    PreferenceStore,
};
pub use report::AnalyticsReport;
