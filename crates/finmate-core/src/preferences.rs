//! Client-side preference store
//!
//! Small key/value settings the ledger has no field for: notification
//! toggles and per-transaction category overrides. Callers inject a
//! [`PreferenceStore`] instead of reaching for ambient global state.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Transaction;

const NOTIFICATION_KEY: &str = "finmate-notification-prefs";
const CATEGORY_OVERRIDES_KEY: &str = "finmate-category-overrides";

/// Key/value store for JSON preference values
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// Preferences held only for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, Value>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preferences stored as one JSON object on disk
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl FilePreferenceStore {
    /// Open the store at `path`; a missing file starts empty
    pub fn open(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            serde_json::from_str(&fs::read_to_string(path)?)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Self::open(&default_preferences_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(serde_json::to_string_pretty(&self.values)?.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

/// Default preferences file (~/.local/share/finmate/preferences.json)
pub fn default_preferences_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("finmate")
        .join("preferences.json")
}

/// Read a typed value, falling back to the default when absent or unreadable
fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: Default + for<'de> Deserialize<'de>,
    S: PreferenceStore + ?Sized,
{
    match store.get(key) {
        Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Malformed preference, using defaults");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read preference, using defaults");
            T::default()
        }
    }
}

/// Notification toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub spending_limit_alerts: bool,
    pub challenge_reminders: bool,
    pub weekly_summary: bool,
    pub offer_notifications: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            spending_limit_alerts: true,
            challenge_reminders: true,
            weekly_summary: false,
            offer_notifications: false,
        }
    }
}

impl NotificationPreferences {
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        load_or_default(store, NOTIFICATION_KEY)
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set(NOTIFICATION_KEY, serde_json::to_value(self)?)
    }
}

/// Category replacements keyed by transaction index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryOverrides {
    overrides: BTreeMap<usize, String>,
}

impl CategoryOverrides {
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        load_or_default(store, CATEGORY_OVERRIDES_KEY)
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.set(CATEGORY_OVERRIDES_KEY, serde_json::to_value(self)?)
    }

    pub fn set(&mut self, index: usize, category: impl Into<String>) {
        self.overrides.insert(index, category.into());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.overrides.get(&index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Overrides in index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.overrides.iter().map(|(i, c)| (*i, c.as_str()))
    }

    /// Copy of `transactions` with overridden categories applied
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .enumerate()
            .map(|(i, tx)| match self.overrides.get(&i) {
                Some(category) => Transaction {
                    category: category.clone(),
                    ..tx.clone()
                },
                None => tx.clone(),
            })
            .collect()
    }
}
