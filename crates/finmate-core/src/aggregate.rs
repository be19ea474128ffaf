//! Aggregations over transaction lists
//!
//! Category totals, income vs. expense, per-limit spending status and the
//! calendar-week comparison. Category lookups against user-supplied labels
//! (limits, chatbot keywords, filters) go through [`category_matches`].

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::models::{SpendingLimit, Transaction};

/// Categories shown in the weekly comparison chart
pub const WEEKLY_CATEGORIES: [&str; 5] = ["Food", "Travel", "Bills", "Recharge", "Others"];

/// Debit total for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Independent credit and debit sums (not netted)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomeExpense {
    pub income: f64,
    pub expense: f64,
}

/// Spending against one configured limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitStatus {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    /// Percent of the limit used, capped at 100 (0 for a zero limit)
    pub percent: f64,
    /// Spent more than the limit
    pub over: bool,
    /// Not over, but at or past the warning ratio
    pub near: bool,
}

/// Debit totals for one category in this and last calendar week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyComparison {
    pub category: String,
    pub this_week: f64,
    pub last_week: f64,
}

/// Canonical category comparison: trimmed and case-insensitive
pub fn category_matches(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Display form of a category label: underscores become spaces and each
/// word is capitalized ("college_expenses" -> "College Expenses")
pub fn humanize_category(category: &str) -> String {
    static WORD_START: OnceLock<Regex> = OnceLock::new();
    let re = WORD_START.get_or_init(|| Regex::new(r"\b\w").expect("valid regex"));

    let spaced = category.replace('_', " ");
    re.replace_all(&spaced, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

/// Debit totals keyed by raw category label, in first-seen order
pub fn raw_category_totals(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for tx in transactions.iter().filter(|t| t.is_debit()) {
        match totals.iter_mut().find(|(c, _)| *c == tx.category) {
            Some((_, amount)) => *amount += tx.amount,
            None => totals.push((tx.category.clone(), tx.amount)),
        }
    }
    totals
}

/// Debit totals per category with humanized labels, in first-seen order
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    raw_category_totals(transactions)
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: humanize_category(&category),
            amount,
        })
        .collect()
}

/// Sum of credits and sum of debits
pub fn income_expense(transactions: &[Transaction]) -> IncomeExpense {
    transactions
        .iter()
        .fold(IncomeExpense::default(), |mut acc, tx| {
            if tx.is_credit() {
                acc.income += tx.amount;
            } else {
                acc.expense += tx.amount;
            }
            acc
        })
}

/// Sum of all debits
pub fn total_expense(transactions: &[Transaction]) -> f64 {
    income_expense(transactions).expense
}

/// Debit total for a category under the canonical match
pub fn category_spend(transactions: &[Transaction], category: &str) -> f64 {
    transactions
        .iter()
        .filter(|t| t.is_debit() && category_matches(&t.category, category))
        .map(|t| t.amount)
        .sum()
}

/// Highest-spend raw category; the first seen wins a tie
pub fn top_category(transactions: &[Transaction]) -> Option<(String, f64)> {
    raw_category_totals(transactions)
        .into_iter()
        .fold(None, |best, (category, amount)| match best {
            Some((_, best_amount)) if best_amount >= amount => best,
            _ => Some((category, amount)),
        })
}

/// Distinct raw categories across all transactions, in first-seen order
pub fn distinct_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for tx in transactions {
        if !categories.contains(&tx.category) {
            categories.push(tx.category.clone());
        }
    }
    categories
}

/// Limit configured for a category, if any
pub fn find_limit<'a>(limits: &'a [SpendingLimit], category: &str) -> Option<&'a SpendingLimit> {
    limits.iter().find(|l| category_matches(&l.category, category))
}

/// Spending status for every configured limit, in limit order
pub fn limit_statuses(
    transactions: &[Transaction],
    limits: &[SpendingLimit],
    config: &AnalyticsConfig,
) -> Vec<LimitStatus> {
    for (i, l) in limits.iter().enumerate() {
        if limits[..i].iter().any(|p| category_matches(&p.category, &l.category)) {
            tracing::warn!(category = %l.category, "Spending limit configured more than once");
        }
    }

    limits
        .iter()
        .map(|l| {
            let spent = category_spend(transactions, &l.category);
            let percent = if l.limit > 0.0 {
                (spent / l.limit * 100.0).min(100.0)
            } else {
                0.0
            };
            let over = spent > l.limit;
            let near = !over && percent >= config.warning_ratio * 100.0;
            LimitStatus {
                category: l.category.clone(),
                limit: l.limit,
                spent,
                percent,
                over,
                near,
            }
        })
        .collect()
}

/// Start of the calendar week (Sunday 00:00 local) containing `now`, in UTC
pub fn week_start(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    let local = now.with_timezone(&offset);
    let sunday = local.date_naive() - Duration::days(local.weekday().num_days_from_sunday() as i64);
    let midnight = sunday.and_time(chrono::NaiveTime::MIN);
    Utc.from_utc_datetime(&(midnight - Duration::seconds(offset.local_minus_utc() as i64)))
}

/// This week vs. last week debit totals for the fixed chart categories,
/// rounded to whole units
pub fn weekly_comparison(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> Vec<WeeklyComparison> {
    let this_start = week_start(now, offset);
    let this_end = this_start + Duration::days(7);
    let last_start = this_start - Duration::days(7);

    let in_range = |tx: &Transaction, start: DateTime<Utc>, end: DateTime<Utc>| {
        let ts = tx.timestamp_millis();
        ts >= start.timestamp_millis() && ts < end.timestamp_millis()
    };

    WEEKLY_CATEGORIES
        .iter()
        .map(|category| {
            let mut this_week = 0.0;
            let mut last_week = 0.0;
            for tx in transactions
                .iter()
                .filter(|t| t.is_debit() && category_matches(&t.category, category))
            {
                if in_range(tx, this_start, this_end) {
                    this_week += tx.amount;
                } else if in_range(tx, last_start, this_start) {
                    last_week += tx.amount;
                }
            }
            WeeklyComparison {
                category: category.to_string(),
                this_week: this_week.round(),
                last_week: last_week.round(),
            }
        })
        .collect()
}

/// Whether any category has spending in either week
pub fn has_weekly_data(comparison: &[WeeklyComparison]) -> bool {
    comparison
        .iter()
        .any(|c| c.this_week > 0.0 || c.last_week > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{credit, debit, debit_at, fixed_now, limit};

    #[test]
    fn test_humanize_category() {
        assert_eq!(humanize_category("college_expenses"), "College Expenses");
        assert_eq!(humanize_category("food"), "Food");
        assert_eq!(humanize_category("EMI"), "EMI");
        assert_eq!(humanize_category("mobile_top_up"), "Mobile Top Up");
    }

    #[test]
    fn test_category_matches_is_trimmed_and_case_insensitive() {
        assert!(category_matches("Travel", "travel"));
        assert!(category_matches(" Food ", "FOOD"));
        assert!(!category_matches("Food", "Foods"));
    }

    #[test]
    fn test_category_totals_first_seen_order() {
        let txs = vec![
            debit(10.0, "travel"),
            debit(5.0, "Food"),
            credit(100.0, fixed_now()),
            debit(2.5, "travel"),
        ];
        let totals = category_totals(&txs);
        assert_eq!(
            totals,
            vec![
                CategoryTotal {
                    category: "Travel".to_string(),
                    amount: 12.5
                },
                CategoryTotal {
                    category: "Food".to_string(),
                    amount: 5.0
                },
            ]
        );
    }

    #[test]
    fn test_totals_sum_to_expense() {
        let txs = vec![
            debit(10.25, "Food"),
            debit(99.0, "Bills"),
            credit(300.0, fixed_now()),
            debit(0.75, "Food"),
            debit(40.0, "subscriptions"),
        ];
        let sum: f64 = category_totals(&txs).iter().map(|c| c.amount).sum();
        let totals = income_expense(&txs);
        assert!((sum - totals.expense).abs() < 1e-9);
        assert_eq!(totals.income, 300.0);
        assert_eq!(totals.expense, 150.0);
    }

    #[test]
    fn test_income_expense_empty() {
        assert_eq!(income_expense(&[]), IncomeExpense::default());
    }

    #[test]
    fn test_top_category_tie_keeps_first() {
        let txs = vec![debit(50.0, "Food"), debit(50.0, "Travel")];
        assert_eq!(top_category(&txs), Some(("Food".to_string(), 50.0)));
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn test_limit_statuses() {
        let config = AnalyticsConfig::default();
        let txs = vec![
            debit(900.0, "food"),
            debit(600.0, "Travel"),
            debit(100.0, "Bills"),
        ];
        let limits = vec![
            limit("Food", 1000.0),
            limit("Travel", 500.0),
            limit("Bills", 1000.0),
            limit("Recharge", 0.0),
        ];
        let statuses = limit_statuses(&txs, &limits, &config);

        assert!(statuses[0].near && !statuses[0].over);
        assert_eq!(statuses[0].percent, 90.0);
        assert!(statuses[1].over && !statuses[1].near);
        assert_eq!(statuses[1].percent, 100.0);
        assert!(!statuses[2].over && !statuses[2].near);
        assert_eq!(statuses[3].percent, 0.0);
        assert!(!statuses[3].over);
    }

    #[test]
    fn test_week_start_is_local_sunday_midnight() {
        let offset = FixedOffset::east_opt(330 * 60).unwrap();
        // Wednesday 2026-03-18 17:30 IST -> Sunday 2026-03-15 00:00 IST
        let start = week_start(fixed_now(), offset);
        assert_eq!(
            start,
            Utc.with_ymd_and_hms(2026, 3, 14, 18, 30, 0).single().unwrap()
        );
    }

    #[test]
    fn test_weekly_comparison() {
        let offset = FixedOffset::east_opt(0).unwrap();
        let now = fixed_now();
        let txs = vec![
            debit_at(100.4, "food", now - Duration::days(1)),
            debit_at(60.0, "Food", now - Duration::days(6)),
            debit_at(30.0, "Travel", now - Duration::days(9)),
            debit_at(999.0, "Travel", now - Duration::days(30)),
            debit_at(5.0, "Clothes", now),
        ];
        let rows = weekly_comparison(&txs, now, offset);

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].category, "Food");
        assert_eq!(rows[0].this_week, 100.0);
        assert_eq!(rows[0].last_week, 60.0);
        assert_eq!(rows[1].this_week, 0.0);
        assert_eq!(rows[1].last_week, 30.0);
        assert!(has_weekly_data(&rows));
        assert!(!has_weekly_data(&weekly_comparison(&[], now, offset)));
    }
}
