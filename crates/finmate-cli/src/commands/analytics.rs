//! Analytics commands: report, insights, health score, weekly comparison

use anyhow::Result;
use chrono::{DateTime, Utc};
use finmate_core::aggregate::has_weekly_data;
use finmate_core::{
    calculate_health_score, filter_by_period, generate_insight_cards, humanize_category,
    weekly_comparison, AnalyticsConfig, AnalyticsReport, HealthBreakdown, InsightCard, Period,
    Severity,
};

use super::{print_json, LedgerView};

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "⚠️ ",
        Severity::Success => "✅",
        Severity::Info => "💡",
    }
}

fn print_cards(cards: &[InsightCard]) {
    for card in cards {
        println!("   {} {}", severity_icon(card.severity), card.title);
        println!("      {}", card.description);
    }
}

pub fn cmd_report(
    view: &LedgerView,
    config: &AnalyticsConfig,
    period: Period,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let report = AnalyticsReport::build(
        &view.transactions,
        &view.limits,
        &view.challenges,
        view.balance,
        period,
        now,
        config,
    );

    if json {
        return print_json(&report);
    }

    println!();
    println!("📊 FinMate Report ({})", period.label());
    println!("   ═══════════════════════════════════════════");
    println!();
    println!(
        "   🛡️  Health: {}/100 ({})",
        report.health.score, report.health.label
    );
    println!("   💰 Balance: {}", config.exact(report.balance));
    println!("   📝 Transactions: {}", report.transaction_count);
    println!();
    println!("   Income:   {}", config.exact(report.income_expense.income));
    println!("   Expenses: {}", config.exact(report.income_expense.expense));

    if !report.category_totals.is_empty() {
        println!();
        println!("   Spending by Category");
        println!("   ─────────────────────────────");
        for total in &report.category_totals {
            println!("   {:<20} {:>12}", total.category, config.exact(total.amount));
        }
    }

    if !report.limit_statuses.is_empty() {
        println!();
        println!("   Limits");
        println!("   ─────────────────────────────");
        for status in &report.limit_statuses {
            let flag = if status.over {
                " 🔴"
            } else if status.near {
                " 🟡"
            } else {
                ""
            };
            println!(
                "   {:<20} {:>5.0}%{}",
                humanize_category(&status.category),
                status.percent,
                flag
            );
        }
    }

    println!();
    println!("   Insights");
    println!("   ─────────────────────────────");
    print_cards(&report.insights);

    Ok(())
}

pub fn cmd_insights(
    view: &LedgerView,
    config: &AnalyticsConfig,
    period: Period,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let filtered = filter_by_period(&view.transactions, period, now);
    let cards = generate_insight_cards(&filtered, &view.limits, period, now, config);

    if json {
        return print_json(&cards);
    }

    println!();
    println!("🤖 Insights ({})", period.label());
    println!("   ─────────────────────────────");
    print_cards(&cards);

    Ok(())
}

pub fn cmd_health(
    view: &LedgerView,
    config: &AnalyticsConfig,
    period: Period,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let filtered = filter_by_period(&view.transactions, period, now);
    let score = calculate_health_score(
        &filtered,
        view.balance,
        &view.limits,
        &view.challenges,
        config,
    );
    let breakdown = HealthBreakdown::compute(&filtered, &view.limits, &view.challenges);

    if json {
        return print_json(&serde_json::json!({
            "health": score,
            "breakdown": breakdown,
        }));
    }

    println!();
    println!("🛡️  Financial Health ({})", period.label());
    println!("   ─────────────────────────────");
    println!("   Score: {}/100 ({})", score.score, score.label);
    println!();
    println!(
        "   Savings rate:    {:>5.1}  (weight {:.1})",
        breakdown.savings, config.savings_weight
    );
    println!(
        "   Limit adherence: {:>5.1}  (weight {:.1})",
        breakdown.limits, config.limit_weight
    );
    println!(
        "   Challenges:      {:>5.1}  (weight {:.1})",
        breakdown.challenges, config.challenge_weight
    );

    Ok(())
}

pub fn cmd_weekly(
    view: &LedgerView,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let comparison = weekly_comparison(&view.transactions, now, config.offset());

    if json {
        return print_json(&comparison);
    }

    if !has_weekly_data(&comparison) {
        println!("No spending in the last two weeks.");
        return Ok(());
    }

    println!();
    println!("📅 This Week vs Last Week");
    println!("   ─────────────────────────────────────────");
    println!("   {:<12} {:>12} {:>12}", "Category", "This week", "Last week");

    for row in &comparison {
        println!(
            "   {:<12} {:>12} {:>12}",
            row.category,
            config.whole(row.this_week),
            config.whole(row.last_week)
        );
    }

    Ok(())
}
