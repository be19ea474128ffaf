//! Transaction command implementations (record, list, balance)

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use finmate_core::aggregate::find_limit;
use finmate_core::models::to_timestamp_nanos;
use finmate_core::{
    filter_by_period, humanize_category, limit_statuses, search, AnalyticsConfig, Ledger, Period,
    Transaction, TransactionType,
};

use super::{print_json, truncate, LedgerView};

#[allow(clippy::too_many_arguments)]
pub fn cmd_record<L: Ledger>(
    ledger: &mut L,
    config: &AnalyticsConfig,
    amount: f64,
    kind: &str,
    category: &str,
    description: &str,
    payment_method: &str,
    now: DateTime<Utc>,
    limit_alerts: bool,
) -> Result<()> {
    let kind: TransactionType = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let category = category.trim();
    let description = if description.trim().is_empty() {
        humanize_category(category)
    } else {
        description.trim().to_string()
    };

    let tx = Transaction::new(
        amount,
        kind,
        category,
        description,
        payment_method,
        to_timestamp_nanos(now),
    );
    ledger
        .record_transaction(tx)
        .context("Failed to record transaction")?;

    println!(
        "✅ Recorded {} of {} in {}",
        kind,
        config.exact(amount),
        humanize_category(category)
    );
    println!("   Balance: {}", config.exact(ledger.balance()?));

    if limit_alerts && kind == TransactionType::Debit {
        print_limit_alert(ledger, config, category, now)?;
    }

    Ok(())
}

/// Warn when this month's spending in `category` is near or over its limit
fn print_limit_alert<L: Ledger>(
    ledger: &L,
    config: &AnalyticsConfig,
    category: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let limits = ledger.spending_limits()?;
    let Some(limit) = find_limit(&limits, category) else {
        return Ok(());
    };

    let month = filter_by_period(&ledger.list_transactions(None)?, Period::Monthly, now);
    let status = limit_statuses(&month, std::slice::from_ref(limit), config);
    if let Some(status) = status.first() {
        if status.over {
            println!(
                "   🔴 Over your {} limit by {}",
                humanize_category(&status.category),
                config.whole(status.spent - status.limit)
            );
        } else if status.near {
            println!(
                "   🟡 {:.0}% of your {} limit used",
                status.percent,
                humanize_category(&status.category)
            );
        }
    }
    Ok(())
}

/// Transactions matching the filters, paired with their ledger index
pub fn select_transactions<'a>(
    view: &'a LedgerView,
    period: Option<Period>,
    category: Option<&str>,
    query: Option<&str>,
    now: DateTime<Utc>,
) -> Vec<(usize, &'a Transaction)> {
    let in_period = match period {
        Some(period) => filter_by_period(&view.transactions, period, now),
        None => view.transactions.clone(),
    };
    let selected = search(&in_period, category, query);

    // Filters preserve order, so one forward walk recovers the indices
    let mut remaining = selected.iter().peekable();
    view.transactions
        .iter()
        .enumerate()
        .filter(|(_, tx)| {
            if remaining.peek() == Some(tx) {
                remaining.next();
                true
            } else {
                false
            }
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_transactions_list(
    view: &LedgerView,
    config: &AnalyticsConfig,
    period: Option<Period>,
    category: Option<&str>,
    query: Option<&str>,
    limit: usize,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let rows = select_transactions(view, period, category, query, now);

    if json {
        let out: Vec<serde_json::Value> = rows
            .iter()
            .rev()
            .take(limit)
            .map(|(index, tx)| serde_json::json!({ "index": index, "transaction": tx }))
            .collect();
        return print_json(&out);
    }

    if rows.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  finmate record --amount 120 --category Food");
        return Ok(());
    }

    let offset = config.offset();
    println!();
    println!("📝 Recent Transactions ({} matching)", rows.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for (index, tx) in rows.iter().rev().take(limit) {
        let amount_str = if tx.is_debit() {
            format!("\x1b[31m-{}\x1b[0m", config.exact(tx.amount)) // Red for expenses
        } else {
            format!("\x1b[32m+{}\x1b[0m", config.exact(tx.amount)) // Green for income
        };

        println!(
            "   [{}] {} │ {:>12} │ {:<16} │ {}",
            index,
            tx.datetime().with_timezone(&offset).format("%-d/%-m/%Y"),
            amount_str,
            truncate(&humanize_category(&tx.category), 16),
            truncate(&tx.description, 30)
        );
    }

    Ok(())
}

pub fn cmd_balance(view: &LedgerView, config: &AnalyticsConfig, json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "balance": view.balance,
            "digiPoints": view.digi_points,
        }));
    }

    println!();
    println!("💰 Balance: {}", config.exact(view.balance));
    println!("⭐ Digi points: {}", view.digi_points);

    Ok(())
}
