//! Dashboard report - everything the analytics page shows for one period

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{
    category_totals, income_expense, limit_statuses, weekly_comparison, CategoryTotal,
    IncomeExpense, LimitStatus, WeeklyComparison,
};
use crate::config::AnalyticsConfig;
use crate::filter::filter_by_period;
use crate::health::{calculate_health_score, HealthBreakdown};
use crate::insights::generate_insight_cards;
use crate::models::{Challenge, HealthScore, InsightCard, Period, SpendingLimit, Transaction};

/// Analytics for one trailing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub period: Period,
    pub generated_at: DateTime<Utc>,
    pub transaction_count: usize,
    pub balance: f64,
    pub category_totals: Vec<CategoryTotal>,
    pub income_expense: IncomeExpense,
    pub insights: Vec<InsightCard>,
    pub health: HealthScore,
    pub health_breakdown: HealthBreakdown,
    pub limit_statuses: Vec<LimitStatus>,
    pub weekly: Vec<WeeklyComparison>,
}

impl AnalyticsReport {
    /// Filter `transactions` to `period` and run every analytic over the result.
    ///
    /// The weekly comparison uses calendar weeks and always reads the full list.
    pub fn build(
        transactions: &[Transaction],
        limits: &[SpendingLimit],
        challenges: &[Challenge],
        balance: f64,
        period: Period,
        now: DateTime<Utc>,
        config: &AnalyticsConfig,
    ) -> Self {
        let filtered = filter_by_period(transactions, period, now);

        let report = Self {
            period,
            generated_at: now,
            transaction_count: filtered.len(),
            balance,
            category_totals: category_totals(&filtered),
            income_expense: income_expense(&filtered),
            insights: generate_insight_cards(&filtered, limits, period, now, config),
            health: calculate_health_score(&filtered, balance, limits, challenges, config),
            health_breakdown: HealthBreakdown::compute(&filtered, limits, challenges),
            limit_statuses: limit_statuses(&filtered, limits, config),
            weekly: weekly_comparison(transactions, now, config.offset()),
        };

        tracing::debug!(
            period = %period,
            transactions = report.transaction_count,
            insights = report.insights.len(),
            score = report.health.score,
            "Built analytics report"
        );
        report
    }
}
