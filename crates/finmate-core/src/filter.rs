//! Period and history filters
//!
//! Period filters keep transactions whose timestamp is at or after
//! `now - window`. There is no upper bound, so future-dated transactions
//! always pass. Input order is preserved.

use chrono::{DateTime, Utc};

use crate::aggregate::category_matches;
use crate::models::{Period, Transaction};

/// Transactions within the trailing window for `period`, relative to `now`
pub fn filter_by_period(
    transactions: &[Transaction],
    period: Period,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    let cutoff = (now - period.window()).timestamp_millis();
    transactions
        .iter()
        .filter(|t| t.timestamp_millis() >= cutoff)
        .cloned()
        .collect()
}

/// [`filter_by_period`] anchored at the current wall-clock time
pub fn filter_by_period_now(transactions: &[Transaction], period: Period) -> Vec<Transaction> {
    filter_by_period(transactions, period, Utc::now())
}

pub fn filter_by_week(transactions: &[Transaction]) -> Vec<Transaction> {
    filter_by_period_now(transactions, Period::Weekly)
}

pub fn filter_by_month(transactions: &[Transaction]) -> Vec<Transaction> {
    filter_by_period_now(transactions, Period::Monthly)
}

pub fn filter_by_year(transactions: &[Transaction]) -> Vec<Transaction> {
    filter_by_period_now(transactions, Period::Yearly)
}

/// Transactions whose timestamp falls in `[start, end)`
pub fn filter_between(
    transactions: &[Transaction],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Transaction> {
    let (start, end) = (start.timestamp_millis(), end.timestamp_millis());
    transactions
        .iter()
        .filter(|t| {
            let ts = t.timestamp_millis();
            ts >= start && ts < end
        })
        .cloned()
        .collect()
}

/// History-page search: narrow by category, then by free text.
///
/// A category of `None` or `"All"` keeps every category. The query is
/// matched case-insensitively against description and category; a blank
/// query keeps everything.
pub fn search(
    transactions: &[Transaction],
    category: Option<&str>,
    query: Option<&str>,
) -> Vec<Transaction> {
    let category = category.filter(|c| !c.trim().eq_ignore_ascii_case("all"));
    let query = query
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    transactions
        .iter()
        .filter(|t| category.map_or(true, |c| category_matches(&t.category, c)))
        .filter(|t| {
            query.as_deref().map_or(true, |q| {
                t.description.to_lowercase().contains(q) || t.category.to_lowercase().contains(q)
            })
        })
        .cloned()
        .collect()
}
