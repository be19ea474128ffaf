//! CSV export command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use finmate_core::export::export_filename;
use finmate_core::{export_transactions_csv, filter_by_period, AnalyticsConfig, Period};

use super::LedgerView;

pub fn cmd_export(
    view: &LedgerView,
    config: &AnalyticsConfig,
    period: Option<Period>,
    output: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<()> {
    let transactions = match period {
        Some(period) => filter_by_period(&view.transactions, period, now),
        None => view.transactions.clone(),
    };

    let csv = export_transactions_csv(&transactions, config).context("Failed to build CSV")?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export_filename(now)));
    std::fs::write(&path, csv)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "✅ Exported {} transactions to {}",
        transactions.len(),
        path.display()
    );
    Ok(())
}
