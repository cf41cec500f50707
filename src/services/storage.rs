//! Key-value storage port
//!
//! All persisted state (the last submitted form and the last generated
//! campaign) goes through [`KeyValueStore`]. The app runs against
//! [`FileStore`]; tests substitute an in-memory store that records the
//! exact read/write sequence.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage key for the last submitted product form
pub const LAST_PAYLOAD_KEY: &str = "adpatterns_last_payload";

/// Storage key for the last generated campaign draft
pub const LAST_CAMPAIGN_KEY: &str = "adpatterns_last_campaign";

/// Errors surfaced by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("i/o error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed value under '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A fallible string-keyed store of string values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and deserialize a JSON value stored under `key`
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Serialize `value` as JSON and store it under `key`
pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Malformed {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}

/// Best-effort read: any storage failure is logged and treated as absent.
/// A value that no longer parses is removed.
pub fn load_or_none<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match load_json(store, key) {
        Ok(value) => value,
        Err(e @ StorageError::Malformed { .. }) => {
            tracing::warn!(key, error = %e, "dropping malformed stored value");
            if let Err(e) = store.remove(key) {
                tracing::warn!(key, error = %e, "ignoring storage remove failure");
            }
            None
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring storage read failure");
            None
        }
    }
}

/// Best-effort write: any storage failure is logged and swallowed
pub fn save_best_effort<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match save_json(store, key, value) {
        Ok(()) => tracing::debug!(key, "stored value"),
        Err(e) => tracing::warn!(key, error = %e, "ignoring storage write failure"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(StorageError::Unavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub use memory::{MemoryStore, StoreOp};
