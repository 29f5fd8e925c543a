//! Local cache of API responses
//!
//! Each entry is a JSON file `<folder>/<name>.json` holding the payload and
//! the time it was fetched:
//!
//! ```json
//! { "fetched_at": "2025-01-15T14:30:00Z", "data": { ... } }
//! ```
//!
//! Reads never fail loudly. A missing, corrupt or mismatched entry is
//! treated as "not cached".

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Duration, Utc};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::{DEFAULT_JSON_INDENT, VAULT_DIR_NAME};
use crate::utils::datetime::TimestampValue;
use crate::utils::json::{load_json, load_record, save_json};

/// Errors specific to vault entries
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Invalid vault entry name '{0}'")]
    InvalidName(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    fetched_at: TimestampValue,
    data: T,
}

/// On-disk cache of API payloads
#[derive(Debug, Clone)]
pub struct Vault {
    folder: PathBuf,
}

impl Vault {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self { folder: folder.into() }
    }

    /// Vault in the `vault` sub-folder of the configured cache directory
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.cache_dir()?.join(VAULT_DIR_NAME)))
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Entry names are plain file stems: no separators, no leading dot
    pub fn validate_name(name: &str) -> Result<(), VaultError> {
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(VaultError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.folder.join(file_name(name))
    }

    /// Store a payload stamped with the current time
    pub fn store<T: Serialize>(&self, name: &str, data: &T) -> bool {
        if let Err(e) = Self::validate_name(name) {
            error!("{}", e);
            return false;
        }

        let envelope = Envelope {
            fetched_at: TimestampValue::now(),
            data,
        };
        save_json(&envelope, file_name(name), Some(&self.folder), Some(DEFAULT_JSON_INDENT))
    }

    /// Cached payload, regardless of age
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        Self::validate_name(name).ok()?;
        load_record::<Envelope<T>>(file_name(name), Some(&self.folder)).map(|envelope| envelope.data)
    }

    /// When the entry was fetched; empty if missing or unreadable
    pub fn fetched_at(&self, name: &str) -> TimestampValue {
        if Self::validate_name(name).is_err() || !self.entry_path(name).exists() {
            return TimestampValue::empty();
        }

        load_json(file_name(name), Some(&self.folder))
            .and_then(|mut value| value.get_mut("fetched_at").map(serde_json::Value::take))
            .map(TimestampValue::from_json)
            .unwrap_or_default()
    }

    /// Whether the entry exists and was fetched less than `max_age` ago
    pub fn is_fresh(&self, name: &str, max_age: Duration) -> bool {
        self.fetched_at(name)
            .utc()
            .map(|fetched| Utc::now().signed_duration_since(fetched) < max_age)
            .unwrap_or(false)
    }

    /// Return the cached payload while fresh, otherwise fetch and store a new one
    ///
    /// A failed fetch is logged and yields `None`; there are no retries.
    pub fn fetch_or_cached<T, F>(&self, name: &str, max_age: Duration, fetcher: F) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        if self.is_fresh(name, max_age) {
            if let Some(data) = self.load(name) {
                debug!("Using cached '{}'", name);
                return Some(data);
            }
        }

        match fetcher() {
            Ok(data) => {
                if self.store(name, &data) {
                    info!("Fetched and cached '{}'", name);
                } else {
                    warn!("Fetched '{}' but could not cache it", name);
                }
                Some(data)
            }
            Err(e) => {
                error!("Failed to fetch '{}': {:#}", name, e);
                None
            }
        }
    }

    /// One-line status, e.g. `"user: cached 5m ago"`
    pub fn summary(&self, name: &str) -> String {
        let fetched_at = self.fetched_at(name);
        if fetched_at.utc().is_some() {
            format!("{}: cached {}", name, fetched_at.format_time_difference())
        } else {
            format!("{}: not cached", name)
        }
    }

    /// Delete an entry; `false` if it did not exist or could not be removed
    pub fn remove(&self, name: &str) -> bool {
        if Self::validate_name(name).is_err() {
            return false;
        }

        let path = self.entry_path(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Removed vault entry '{}'", name);
                true
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                error!("Failed to remove {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Names of all stored entries, sorted
    pub fn entries(&self) -> Vec<String> {
        let Ok(dir) = fs::read_dir(&self.folder) else {
            return Vec::new();
        };

        let mut names: Vec<String> = dir
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names
    }
}

fn file_name(name: &str) -> String {
    format!("{}.json", name)
}
