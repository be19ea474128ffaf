//! Ledger - the transaction/limit/challenge store the analytics read from
//!
//! The [`Ledger`] trait mirrors the remote ledger's request/response
//! operations. It is the validation boundary: records that reach the
//! analytics functions have already passed these checks.
//!
//! [`SnapshotLedger`] keeps the whole ledger in one JSON document, either in
//! memory or on disk. File-backed ledgers are rewritten atomically after
//! every mutation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregate::category_matches;
use crate::error::{Error, Result};
use crate::models::{Challenge, SpendingLimit, Transaction, TransactionType};

/// Operations offered by the transaction ledger
pub trait Ledger: Send + Sync {
    /// All transactions, optionally narrowed to one category, in recording order
    fn list_transactions(&self, category: Option<&str>) -> Result<Vec<Transaction>>;

    /// Append a transaction and adjust the balance
    fn record_transaction(&mut self, transaction: Transaction) -> Result<()>;

    fn spending_limits(&self) -> Result<Vec<SpendingLimit>>;

    /// Create or replace the limit for a category
    fn set_spending_limit(&mut self, category: &str, limit: f64) -> Result<()>;

    fn challenges(&self) -> Result<Vec<Challenge>>;

    /// Create a challenge and return its id
    fn create_challenge(
        &mut self,
        description: &str,
        target_amount: f64,
        reward_points: u64,
    ) -> Result<u64>;

    /// Mark a challenge completed and award its points
    fn complete_challenge(&mut self, id: u64) -> Result<()>;

    fn balance(&self) -> Result<f64>;

    fn digi_points(&self) -> Result<u64>;
}

/// Serialized ledger state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerSnapshot {
    pub balance: f64,
    pub digi_points: u64,
    pub transactions: Vec<Transaction>,
    pub spending_limits: Vec<SpendingLimit>,
    pub challenges: Vec<Challenge>,
}

/// Ledger held as a single JSON snapshot
#[derive(Debug, Default)]
pub struct SnapshotLedger {
    snapshot: LedgerSnapshot,
    path: Option<PathBuf>,
}

impl SnapshotLedger {
    /// Empty ledger that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// In-memory ledger seeded from a snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            snapshot,
            path: None,
        }
    }

    /// Open a file-backed ledger; a missing file starts empty
    pub fn open(path: &Path) -> Result<Self> {
        let snapshot = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!(path = %path.display(), "Snapshot not found, starting empty");
            LedgerSnapshot::default()
        };
        Ok(Self {
            snapshot,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create a new file-backed ledger with an opening balance
    pub fn create(path: &Path, balance: f64) -> Result<Self> {
        validate_amount("balance", balance)?;
        let ledger = Self {
            snapshot: LedgerSnapshot {
                balance,
                ..LedgerSnapshot::default()
            },
            path: Some(path.to_path_buf()),
        };
        ledger.persist()?;
        tracing::info!(path = %path.display(), balance, "Created ledger snapshot");
        Ok(ledger)
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Write the snapshot to disk (no-op for in-memory ledgers)
    pub fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let json = serde_json::to_string_pretty(&self.snapshot)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl Ledger for SnapshotLedger {
    fn list_transactions(&self, category: Option<&str>) -> Result<Vec<Transaction>> {
        Ok(self
            .snapshot
            .transactions
            .iter()
            .filter(|t| category.map_or(true, |c| category_matches(&t.category, c)))
            .cloned()
            .collect())
    }

    fn record_transaction(&mut self, transaction: Transaction) -> Result<()> {
        validate_amount("amount", transaction.amount)?;
        validate_category(&transaction.category)?;

        match transaction.kind {
            TransactionType::Debit => self.snapshot.balance -= transaction.amount,
            TransactionType::Credit => self.snapshot.balance += transaction.amount,
        }
        tracing::info!(
            kind = %transaction.kind,
            amount = transaction.amount,
            category = %transaction.category,
            "Recorded transaction"
        );
        self.snapshot.transactions.push(transaction);
        self.persist()
    }

    fn spending_limits(&self) -> Result<Vec<SpendingLimit>> {
        Ok(self.snapshot.spending_limits.clone())
    }

    fn set_spending_limit(&mut self, category: &str, limit: f64) -> Result<()> {
        validate_amount("limit", limit)?;
        validate_category(category)?;

        let category = category.trim();
        match self
            .snapshot
            .spending_limits
            .iter_mut()
            .find(|l| category_matches(&l.category, category))
        {
            Some(existing) => {
                existing.category = category.to_string();
                existing.limit = limit;
            }
            None => self
                .snapshot
                .spending_limits
                .push(SpendingLimit::new(category, limit)),
        }
        tracing::info!(category, limit, "Set spending limit");
        self.persist()
    }

    fn challenges(&self) -> Result<Vec<Challenge>> {
        Ok(self.snapshot.challenges.clone())
    }

    fn create_challenge(
        &mut self,
        description: &str,
        target_amount: f64,
        reward_points: u64,
    ) -> Result<u64> {
        validate_amount("target amount", target_amount)?;
        if description.trim().is_empty() {
            return Err(Error::InvalidData(
                "Challenge description must not be empty".to_string(),
            ));
        }

        let id = self
            .snapshot
            .challenges
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(1, |max| max + 1);
        self.snapshot.challenges.push(Challenge {
            id,
            description: description.trim().to_string(),
            target_amount,
            reward_points,
            completed: false,
        });
        tracing::info!(id, reward_points, "Created challenge");
        self.persist()?;
        Ok(id)
    }

    fn complete_challenge(&mut self, id: u64) -> Result<()> {
        let challenge = self
            .snapshot
            .challenges
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Challenge {}", id)))?;

        if challenge.completed {
            return Err(Error::InvalidData(format!(
                "Challenge {} is already completed",
                id
            )));
        }
        challenge.completed = true;
        let points = challenge.reward_points;
        self.snapshot.digi_points += points;
        tracing::info!(id, points, "Completed challenge");
        self.persist()
    }

    fn balance(&self) -> Result<f64> {
        Ok(self.snapshot.balance)
    }

    fn digi_points(&self) -> Result<u64> {
        Ok(self.snapshot.digi_points)
    }
}

fn validate_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidData(format!(
            "{} must be a non-negative number (got {})",
            field, value
        )));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<()> {
    if category.trim().is_empty() {
        return Err(Error::InvalidData("Category must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{credit, debit, fixed_now};

    #[test]
    fn test_record_adjusts_balance() {
        let mut ledger = SnapshotLedger::in_memory();
        ledger.record_transaction(credit(1000.0, fixed_now())).unwrap();
        ledger.record_transaction(debit(250.0, "Food")).unwrap();

        assert_eq!(ledger.balance().unwrap(), 750.0);
        assert_eq!(ledger.list_transactions(None).unwrap().len(), 2);
        assert_eq!(ledger.list_transactions(Some("food")).unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_amounts() {
        let mut ledger = SnapshotLedger::in_memory();
        assert!(matches!(
            ledger.record_transaction(debit(-1.0, "Food")),
            Err(Error::InvalidData(_))
        ));
        assert!(ledger.record_transaction(debit(f64::NAN, "Food")).is_err());
        assert!(ledger.record_transaction(debit(1.0, "  ")).is_err());
        assert!(ledger.set_spending_limit("Food", -5.0).is_err());
        assert!(ledger.list_transactions(None).unwrap().is_empty());
    }

    #[test]
    fn test_set_limit_replaces_existing_category() {
        let mut ledger = SnapshotLedger::in_memory();
        ledger.set_spending_limit("Food", 500.0).unwrap();
        ledger.set_spending_limit(" food ", 800.0).unwrap();
        ledger.set_spending_limit("Travel", 300.0).unwrap();

        let limits = ledger.spending_limits().unwrap();
        assert_eq!(limits.len(), 2);
        assert_eq!(limits[0], SpendingLimit::new("food", 800.0));
    }

    #[test]
    fn test_challenge_lifecycle() {
        let mut ledger = SnapshotLedger::in_memory();
        let first = ledger.create_challenge("No takeout week", 500.0, 20).unwrap();
        let second = ledger.create_challenge("Save 1000", 1000.0, 50).unwrap();
        assert_eq!((first, second), (1, 2));

        ledger.complete_challenge(second).unwrap();
        assert_eq!(ledger.digi_points().unwrap(), 50);
        assert!(ledger.challenges().unwrap()[1].completed);

        assert!(matches!(
            ledger.complete_challenge(second),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            ledger.complete_challenge(99),
            Err(Error::NotFound(_))
        ));
        assert!(ledger.create_challenge("   ", 1.0, 1).is_err());
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("finmate.json");

        let mut ledger = SnapshotLedger::create(&path, 100.0).unwrap();
        ledger.record_transaction(debit(40.0, "Food")).unwrap();
        ledger.set_spending_limit("Food", 200.0).unwrap();

        let reopened = SnapshotLedger::open(&path).unwrap();
        assert_eq!(reopened.snapshot(), ledger.snapshot());
        assert_eq!(reopened.balance().unwrap(), 60.0);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SnapshotLedger::open(&dir.path().join("none.json")).unwrap();
        assert_eq!(ledger.snapshot(), &LedgerSnapshot::default());
    }

    #[test]
    fn test_open_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(SnapshotLedger::open(&path), Err(Error::Json(_))));
    }
}
