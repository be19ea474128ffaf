//! Insight Generator - ranked observations for the analytics page
//!
//! Evaluates a fixed, ordered list of independent rules over the supplied
//! transactions and spending limits, appends each rule's card (if any) and
//! truncates the result to the configured maximum (4 by default).
//!
//! ## Rules
//!
//! - **Top category** - highest-spend category, or an overspending alert
//!   when it exceeds its limit
//! - **Subscriptions** - combined subscription spend above a threshold
//! - **Savings rate** - share of income not spent
//! - **Month over month** - trailing 30 days vs. the 30 days before
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finmate_core::{generate_insight_cards, AnalyticsConfig, Period};
//!
//! let cards = generate_insight_cards(&txs, &limits, Period::Monthly, Utc::now(), &config);
//! ```

pub mod rules;

use chrono::{DateTime, Utc};

use crate::aggregate::{income_expense, IncomeExpense};
use crate::config::AnalyticsConfig;
use crate::models::{InsightCard, Period, SpendingLimit, Transaction};

pub use rules::InsightRule;

/// Inputs shared by every rule
pub struct InsightContext<'a> {
    pub transactions: &'a [Transaction],
    pub limits: &'a [SpendingLimit],
    /// Used only for narrative text
    pub period: Period,
    /// Anchor for the month-over-month windows
    pub now: DateTime<Utc>,
    pub config: &'a AnalyticsConfig,
    /// Income and expense over `transactions`
    pub totals: IncomeExpense,
}

impl<'a> InsightContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        limits: &'a [SpendingLimit],
        period: Period,
        now: DateTime<Utc>,
        config: &'a AnalyticsConfig,
    ) -> Self {
        Self {
            transactions,
            limits,
            period,
            now,
            config,
            totals: income_expense(transactions),
        }
    }
}

/// Evaluate every rule in order and keep at most `config.max_cards` cards
pub fn generate_insight_cards(
    transactions: &[Transaction],
    limits: &[SpendingLimit],
    period: Period,
    now: DateTime<Utc>,
    config: &AnalyticsConfig,
) -> Vec<InsightCard> {
    let ctx = InsightContext::new(transactions, limits, period, now, config);

    let mut cards: Vec<InsightCard> = InsightRule::all()
        .iter()
        .filter_map(|rule| {
            let card = rule.evaluate(&ctx);
            tracing::debug!(
                rule = rule.as_str(),
                fired = card.is_some(),
                "Insight rule evaluated"
            );
            card
        })
        .collect();

    cards.truncate(config.max_cards);
    cards
}

/// [`generate_insight_cards`] anchored at the current wall-clock time
pub fn generate_insight_cards_now(
    transactions: &[Transaction],
    limits: &[SpendingLimit],
    period: Period,
    config: &AnalyticsConfig,
) -> Vec<InsightCard> {
    generate_insight_cards(transactions, limits, period, Utc::now(), config)
}
