//! Individual insight rules
//!
//! Each rule looks at the shared [`InsightContext`] and yields at most one
//! card. Rules never see each other's output.

use chrono::Duration;

use crate::aggregate::{category_spend, find_limit, humanize_category, top_category};
use crate::filter::filter_between;
use crate::models::{InsightCard, InsightIcon, Severity};

use super::InsightContext;

const SUBSCRIPTIONS: &str = "Subscriptions";

/// Insight rules, evaluated in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightRule {
    /// Highest-spend category, or overspend against its limit
    TopCategory,
    /// Combined subscription spend above the threshold
    Subscriptions,
    /// Savings rate commentary (or a nudge to record income)
    SavingsRate,
    /// Trailing window vs. the window before it
    MonthOverMonth,
}

impl InsightRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopCategory => "top_category",
            Self::Subscriptions => "subscriptions",
            Self::SavingsRate => "savings_rate",
            Self::MonthOverMonth => "month_over_month",
        }
    }

    /// All rules in evaluation order
    pub fn all() -> &'static [InsightRule] {
        &[
            Self::TopCategory,
            Self::Subscriptions,
            Self::SavingsRate,
            Self::MonthOverMonth,
        ]
    }

    pub fn evaluate(&self, ctx: &InsightContext<'_>) -> Option<InsightCard> {
        match self {
            Self::TopCategory => top_category_card(ctx),
            Self::Subscriptions => subscriptions_card(ctx),
            Self::SavingsRate => Some(savings_rate_card(ctx)),
            Self::MonthOverMonth => month_over_month_card(ctx),
        }
    }
}

fn top_category_card(ctx: &InsightContext<'_>) -> Option<InsightCard> {
    let (category, total) = top_category(ctx.transactions)?;
    let name = humanize_category(&category);

    match find_limit(ctx.limits, &category) {
        Some(limit) if total > limit.limit => Some(InsightCard::new(
            "Overspending Alert",
            format!(
                "You've exceeded your {} limit by {} {}.",
                name,
                ctx.config.whole(total - limit.limit),
                ctx.period.label()
            ),
            InsightIcon::AlertTriangle,
            Severity::Warning,
        )),
        _ => Some(InsightCard::new(
            "Top Spending Category",
            format!(
                "{} is your biggest expense {} at {}.",
                name,
                ctx.period.label(),
                ctx.config.whole(total)
            ),
            InsightIcon::TrendingUp,
            Severity::Info,
        )),
    }
}

fn subscriptions_card(ctx: &InsightContext<'_>) -> Option<InsightCard> {
    let spent = category_spend(ctx.transactions, SUBSCRIPTIONS);
    if spent <= ctx.config.subscription_threshold {
        return None;
    }

    Some(InsightCard::new(
        "Subscription Check",
        format!(
            "You've spent {} on subscriptions {}. Review them and cancel the ones you don't use.",
            ctx.config.whole(spent),
            ctx.period.label()
        ),
        InsightIcon::RefreshCw,
        Severity::Warning,
    ))
}

fn savings_rate_card(ctx: &InsightContext<'_>) -> InsightCard {
    let income = ctx.totals.income;
    if income <= 0.0 {
        return InsightCard::new(
            "Track Your Income",
            "Record your income to see your savings rate and get personalised tips.",
            InsightIcon::PlusCircle,
            Severity::Info,
        );
    }

    let rate = (income - ctx.totals.expense) / income * 100.0;
    if rate < ctx.config.savings_rate_target {
        InsightCard::new(
            "Low Savings Rate",
            format!(
                "You're saving {:.0}% of your income {}. Aim for at least {:.0}%.",
                rate.round(),
                ctx.period.label(),
                ctx.config.savings_rate_target
            ),
            InsightIcon::PiggyBank,
            Severity::Warning,
        )
    } else {
        InsightCard::new(
            "Great Savings!",
            format!(
                "You're saving {:.0}% of your income {}. Keep it up!",
                rate.round(),
                ctx.period.label()
            ),
            InsightIcon::CheckCircle,
            Severity::Success,
        )
    }
}

/// Rounds halves toward positive infinity (-2.5 becomes -2)
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn month_over_month_card(ctx: &InsightContext<'_>) -> Option<InsightCard> {
    // Out-of-range windows skip the comparison
    let window = Duration::try_days(ctx.config.comparison_window_days)?;
    let this_start = ctx.now.checked_sub_signed(window)?;
    let last_start = this_start.checked_sub_signed(window)?;

    // Trailing window has no upper bound, matching the period filter
    let this_month: f64 = ctx
        .transactions
        .iter()
        .filter(|t| t.is_debit() && t.timestamp_millis() >= this_start.timestamp_millis())
        .map(|t| t.amount)
        .sum();
    let last_month: f64 = filter_between(ctx.transactions, last_start, this_start)
        .iter()
        .filter(|t| t.is_debit())
        .map(|t| t.amount)
        .sum();

    if last_month <= 0.0 {
        return None;
    }

    let change = (this_month - last_month) / last_month * 100.0;
    let signed = format!("{:+}%", round_half_up(change) as i64);
    let days = ctx.config.comparison_window_days;
    let threshold = ctx.config.month_change_threshold;

    let card = if change > threshold {
        InsightCard::new(
            "Spending Up",
            format!(
                "Your spending changed by {} compared to the previous {} days.",
                signed, days
            ),
            InsightIcon::TrendingUp,
            Severity::Warning,
        )
    } else if change < -threshold {
        InsightCard::new(
            "Spending Down",
            format!(
                "Your spending changed by {} compared to the previous {} days. Nice work!",
                signed, days
            ),
            InsightIcon::CheckCircle,
            Severity::Success,
        )
    } else {
        InsightCard::new(
            "Steady Spending",
            format!(
                "Your spending changed by {} compared to the previous {} days.",
                signed, days
            ),
            InsightIcon::BarChart2,
            Severity::Info,
        )
    };
    Some(card)
}
