//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_ledger` / `load_view` - Open the ledger snapshot for a command
//! - `load_config` / `open_prefs` - Analytics config and preference store
//! - `cmd_init` - Create a new ledger snapshot

use std::path::Path;

use anyhow::{bail, Context, Result};
use finmate_core::{
    AnalyticsConfig, CategoryOverrides, Challenge, FilePreferenceStore, Ledger,
    NotificationPreferences, SnapshotLedger, SpendingLimit, Transaction,
};

/// Open an existing ledger snapshot
pub fn open_ledger(path: &Path) -> Result<SnapshotLedger> {
    if !path.exists() {
        bail!(
            "No ledger found at {}. Create one with: finmate init",
            path.display()
        );
    }
    SnapshotLedger::open(path).context("Failed to open ledger snapshot")
}

/// Load analytics config from an explicit path or the default locations
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found: {}", path.display());
            }
            AnalyticsConfig::load_from(path).context("Failed to load analytics config")
        }
        None => AnalyticsConfig::load().context("Failed to load analytics config"),
    }
}

/// Open the preference store at `path`, or the default location
pub fn open_prefs(path: Option<&Path>) -> Result<FilePreferenceStore> {
    match path {
        Some(path) => FilePreferenceStore::open(path),
        None => FilePreferenceStore::open_default(),
    }
    .context("Failed to open preferences")
}

/// Category overrides, or none if the preference file can't be read
pub fn load_overrides(path: Option<&Path>) -> CategoryOverrides {
    match open_prefs(path) {
        Ok(store) => CategoryOverrides::load(&store),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring category overrides");
            CategoryOverrides::default()
        }
    }
}

/// Notification toggles, or the defaults if the preference file can't be read
pub fn load_notifications(path: Option<&Path>) -> NotificationPreferences {
    match open_prefs(path) {
        Ok(store) => NotificationPreferences::load(&store),
        Err(e) => {
            tracing::warn!(error = %e, "Using default notification preferences");
            NotificationPreferences::default()
        }
    }
}

/// Materialized ledger data the read-only commands work from
#[derive(Debug, Clone)]
pub struct LedgerView {
    /// All transactions in recording order, with category overrides applied
    pub transactions: Vec<Transaction>,
    pub limits: Vec<SpendingLimit>,
    pub challenges: Vec<Challenge>,
    pub balance: f64,
    pub digi_points: u64,
}

impl LedgerView {
    pub fn load<L: Ledger>(ledger: &L, overrides: &CategoryOverrides) -> Result<Self> {
        let transactions = ledger
            .list_transactions(None)
            .context("Failed to list transactions")?;
        Ok(Self {
            transactions: overrides.apply(&transactions),
            limits: ledger
                .spending_limits()
                .context("Failed to load spending limits")?,
            challenges: ledger.challenges().context("Failed to load challenges")?,
            balance: ledger.balance().context("Failed to load balance")?,
            digi_points: ledger.digi_points().context("Failed to load digi points")?,
        })
    }
}

/// Open the ledger and preferences and build a [`LedgerView`]
pub fn load_view(snapshot: &Path, prefs: Option<&Path>) -> Result<LedgerView> {
    let ledger = open_ledger(snapshot)?;
    LedgerView::load(&ledger, &load_overrides(prefs))
}

pub fn cmd_init(snapshot: &Path, balance: f64) -> Result<()> {
    if snapshot.exists() {
        bail!("Ledger already exists at {}", snapshot.display());
    }

    println!("🔧 Creating ledger at {}...", snapshot.display());
    SnapshotLedger::create(snapshot, balance).context("Failed to create ledger")?;

    println!("✅ Ledger created with opening balance {:.2}", balance);
    println!();
    println!("Next steps:");
    println!("  1. Record spending: finmate record --amount 120 --category Food");
    println!("  2. Set a budget:    finmate limits set Food 3000");
    println!("  3. See analytics:   finmate report");

    Ok(())
}
