//! Financial health score
//!
//! Combines three sub-scores (each 0-100) into one integer score:
//!
//! | Sub-score        | Weight | Empty-input value |
//! |------------------|--------|-------------------|
//! | Savings rate     | 0.4    | 50 (no income, no expense) |
//! | Limit adherence  | 0.4    | 100 (no limits)   |
//! | Challenges       | 0.2    | 50 (no challenges) |
//!
//! Weights come from [`AnalyticsConfig`] and default to the table above.

use serde::{Deserialize, Serialize};

use crate::aggregate::{category_spend, income_expense};
use crate::config::AnalyticsConfig;
use crate::models::{Challenge, HealthScore, SpendingLimit, Transaction};

/// Neutral sub-score when there is nothing to judge
const NEUTRAL: f64 = 50.0;

/// The sub-scores behind a health score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub savings: f64,
    pub limits: f64,
    pub challenges: f64,
}

impl HealthBreakdown {
    pub fn compute(
        transactions: &[Transaction],
        limits: &[SpendingLimit],
        challenges: &[Challenge],
    ) -> Self {
        Self {
            savings: savings_score(transactions),
            limits: limit_score(transactions, limits),
            challenges: challenge_score(challenges),
        }
    }

    /// Weighted, rounded, clamped to 0..=100
    pub fn score(&self, config: &AnalyticsConfig) -> u8 {
        let weighted = self.savings * config.savings_weight
            + self.limits * config.limit_weight
            + self.challenges * config.challenge_weight;
        weighted.round().clamp(0.0, 100.0) as u8
    }
}

/// Score the user's finances over `transactions`.
///
/// `balance` is accepted for callers that display it alongside the score;
/// it does not affect the result.
pub fn calculate_health_score(
    transactions: &[Transaction],
    balance: f64,
    limits: &[SpendingLimit],
    challenges: &[Challenge],
    config: &AnalyticsConfig,
) -> HealthScore {
    let breakdown = HealthBreakdown::compute(transactions, limits, challenges);
    let score = breakdown.score(config);

    tracing::debug!(
        savings = breakdown.savings,
        limits = breakdown.limits,
        challenges = breakdown.challenges,
        balance,
        score,
        "Health score computed"
    );

    HealthScore::from_score(score)
}

fn savings_score(transactions: &[Transaction]) -> f64 {
    let totals = income_expense(transactions);
    if totals.income > 0.0 {
        let rate = ((totals.income - totals.expense) / totals.income).max(0.0);
        (rate * 100.0).min(100.0)
    } else if totals.expense == 0.0 {
        NEUTRAL
    } else {
        0.0
    }
}

fn limit_score(transactions: &[Transaction], limits: &[SpendingLimit]) -> f64 {
    if limits.is_empty() {
        return 100.0;
    }
    let adhered = limits
        .iter()
        .filter(|l| category_spend(transactions, &l.category) <= l.limit)
        .count();
    adhered as f64 / limits.len() as f64 * 100.0
}

fn challenge_score(challenges: &[Challenge]) -> f64 {
    if challenges.is_empty() {
        return NEUTRAL;
    }
    let completed = challenges.iter().filter(|c| c.completed).count();
    completed as f64 / challenges.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HealthLabel;
    use crate::test_utils::{challenge, credit, debit, fixed_now, limit};

    fn score(
        txs: &[Transaction],
        limits: &[SpendingLimit],
        challenges: &[Challenge],
    ) -> HealthScore {
        calculate_health_score(txs, 0.0, limits, challenges, &AnalyticsConfig::default())
    }

    #[test]
    fn test_empty_everything() {
        // 50*0.4 + 100*0.4 + 50*0.2 = 70
        let result = score(&[], &[], &[]);
        assert_eq!(result.score, 70);
        assert_eq!(result.label, HealthLabel::Good);
        assert_eq!(result.color, "text-green-500");

        let breakdown = HealthBreakdown::compute(&[], &[], &[]);
        assert_eq!(breakdown.savings, 50.0);
        assert_eq!(breakdown.limits, 100.0);
        assert_eq!(breakdown.challenges, 50.0);
    }

    #[test]
    fn test_expense_without_income_floors_savings() {
        let breakdown = HealthBreakdown::compute(&[debit(10.0, "Food")], &[], &[]);
        assert_eq!(breakdown.savings, 0.0);
        // 0 + 40 + 10
        assert_eq!(score(&[debit(10.0, "Food")], &[], &[]).score, 50);
    }

    #[test]
    fn test_overspent_income_floors_savings() {
        let txs = vec![credit(100.0, fixed_now()), debit(300.0, "Food")];
        assert_eq!(HealthBreakdown::compute(&txs, &[], &[]).savings, 0.0);
    }

    #[test]
    fn test_perfect_score() {
        let txs = vec![credit(1000.0, fixed_now())];
        let result = score(&txs, &[limit("Food", 100.0)], &[challenge(1, true)]);
        assert_eq!(result.score, 100);
        assert_eq!(result.label, HealthLabel::Excellent);
    }

    #[test]
    fn test_limit_adherence_uses_canonical_category_match() {
        let txs = vec![debit(150.0, "food"), debit(50.0, "Travel")];
        let limits = vec![limit("Food", 100.0), limit("travel", 100.0)];
        let breakdown = HealthBreakdown::compute(&txs, &limits, &[]);
        assert_eq!(breakdown.limits, 50.0);
    }

    #[test]
    fn test_challenge_ratio() {
        let challenges = vec![
            challenge(1, true),
            challenge(2, false),
            challenge(3, false),
            challenge(4, true),
        ];
        assert_eq!(HealthBreakdown::compute(&[], &[], &challenges).challenges, 50.0);
    }

    #[test]
    fn test_balance_does_not_affect_score() {
        let config = AnalyticsConfig::default();
        let txs = vec![credit(500.0, fixed_now()), debit(100.0, "Food")];
        let a = calculate_health_score(&txs, 0.0, &[], &[], &config);
        let b = calculate_health_score(&txs, 1_000_000.0, &[], &[], &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_always_in_range() {
        let now = fixed_now();
        for income in [0.0, 10.0, 1000.0] {
            for expense in [0.0, 5.0, 5000.0] {
                let txs = vec![credit(income, now), debit(expense, "Food")];
                let result = score(&txs, &[limit("Food", 10.0)], &[challenge(1, false)]);
                assert!(result.score <= 100);
                assert_eq!(result.label, HealthLabel::from_score(result.score));
            }
        }
    }
}
