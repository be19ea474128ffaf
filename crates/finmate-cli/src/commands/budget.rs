//! Spending limit and challenge commands

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use finmate_core::{
    filter_by_period, humanize_category, limit_statuses, AnalyticsConfig, Ledger, Period,
};

use super::{print_json, truncate, LedgerView};

pub fn cmd_limits_list(
    view: &LedgerView,
    config: &AnalyticsConfig,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let month = filter_by_period(&view.transactions, Period::Monthly, now);
    let statuses = limit_statuses(&month, &view.limits, config);

    if json {
        return print_json(&statuses);
    }

    if statuses.is_empty() {
        println!("No spending limits set. Add one with:");
        println!("  finmate limits set Food 3000");
        return Ok(());
    }

    println!();
    println!("🎯 Spending Limits (this month)");
    println!("   ─────────────────────────────────────────────");

    for status in &statuses {
        let icon = if status.over {
            "🔴"
        } else if status.near {
            "🟡"
        } else {
            "🟢"
        };
        println!(
            "   {} {:<18} {:>10} / {:<10} ({:.0}%)",
            icon,
            humanize_category(&status.category),
            config.exact(status.spent),
            config.exact(status.limit),
            status.percent
        );
    }

    let over = statuses.iter().filter(|s| s.over).count();
    if over > 0 {
        println!();
        println!("⚠️  {} limit(s) exceeded this month.", over);
    }

    Ok(())
}

pub fn cmd_limits_set<L: Ledger>(
    ledger: &mut L,
    config: &AnalyticsConfig,
    category: &str,
    amount: f64,
) -> Result<()> {
    ledger
        .set_spending_limit(category, amount)
        .context("Failed to set spending limit")?;

    println!(
        "✅ {} limit set to {}",
        humanize_category(category.trim()),
        config.exact(amount)
    );
    Ok(())
}

pub fn cmd_challenges_list(view: &LedgerView, config: &AnalyticsConfig, json: bool) -> Result<()> {
    if json {
        return print_json(&view.challenges);
    }

    if view.challenges.is_empty() {
        println!("No challenges yet. Create one with:");
        println!("  finmate challenges add --description \"No takeout this week\" --target 500");
        return Ok(());
    }

    println!();
    println!("🏆 Challenges");
    println!("   ─────────────────────────────────────────────");

    for challenge in &view.challenges {
        let mark = if challenge.completed { "✅" } else { "⬜" };
        println!(
            "   {} [{}] {:<36} {:>10} │ {} pts",
            mark,
            challenge.id,
            truncate(&challenge.description, 36),
            config.exact(challenge.target_amount),
            challenge.reward_points
        );
    }

    let completed = view.challenges.iter().filter(|c| c.completed).count();
    println!();
    println!(
        "   {}/{} completed │ ⭐ {} digi points",
        completed,
        view.challenges.len(),
        view.digi_points
    );

    Ok(())
}

pub fn cmd_challenges_add<L: Ledger>(
    ledger: &mut L,
    description: &str,
    target: f64,
    points: u64,
) -> Result<()> {
    let id = ledger
        .create_challenge(description, target, points)
        .context("Failed to create challenge")?;

    println!("✅ Created challenge {}: {}", id, description.trim());
    println!("   Complete it with: finmate challenges complete {}", id);
    Ok(())
}

pub fn cmd_challenges_complete<L: Ledger>(ledger: &mut L, id: u64) -> Result<()> {
    ledger
        .complete_challenge(id)
        .with_context(|| format!("Failed to complete challenge {}", id))?;

    println!("🎉 Challenge {} completed!", id);
    println!("   ⭐ Digi points: {}", ledger.digi_points()?);
    Ok(())
}
