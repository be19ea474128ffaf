//! Test utilities
//!
//! Builders for transactions, limits and challenges, plus a fixed "now"
//! so window-based tests don't depend on the wall clock.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{to_timestamp_nanos, Challenge, SpendingLimit, Transaction, TransactionType};

/// Wednesday 2026-03-18 12:00:00 UTC
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 18, 12, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// A debit in `category` at `at`
pub fn debit_at(amount: f64, category: &str, at: DateTime<Utc>) -> Transaction {
    Transaction::new(
        amount,
        TransactionType::Debit,
        category,
        format!("{} purchase", category),
        "upi",
        to_timestamp_nanos(at),
    )
}

/// A debit in `category` one hour before [`fixed_now`]
pub fn debit(amount: f64, category: &str) -> Transaction {
    debit_at(amount, category, fixed_now() - chrono::Duration::hours(1))
}

/// A credit (income) at `at`
pub fn credit(amount: f64, at: DateTime<Utc>) -> Transaction {
    Transaction::new(
        amount,
        TransactionType::Credit,
        "Income",
        "Credit received",
        "bank",
        to_timestamp_nanos(at),
    )
}

pub fn limit(category: &str, amount: f64) -> SpendingLimit {
    SpendingLimit::new(category, amount)
}

pub fn challenge(id: u64, completed: bool) -> Challenge {
    Challenge {
        id,
        description: format!("Challenge {}", id),
        target_amount: 1000.0,
        reward_points: 50,
        completed,
    }
}
