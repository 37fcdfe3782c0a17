//! Key-value storage port and JSON helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything the site remembers lives in a string-to-string store shaped
//! like the browser's `localStorage`. The browser client, the file-backed
//! CLI store and the in-memory test store all implement [`KvStore`]; domain
//! code only sees the trait.
//!
//! ERROR HANDLING
//! ==============
//! Reads never fail upward: a missing key, an unreadable backend or corrupt
//! JSON all log and fall back to the caller's default. Writes return
//! [`StoreError`] so the UI can warn that storage is full. Read-modify-write
//! callers that must not clobber undecodable data read strictly instead and
//! get [`StoreError::Undecodable`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// User-visible warning shown when a write did not reach storage.
pub const STORAGE_NOTICE: &str = "⚠️ Storage error. Try clearing old listings.";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend refused the operation (e.g. storage disabled).
    #[error("storage backend error: {0}")]
    Backend(String),
    /// Writing `key` would exceed the available quota.
    #[error("storage quota exceeded writing `{key}`")]
    QuotaExceeded { key: String },
    /// The value under `key` exists but cannot be decoded; overwriting it
    /// would lose data.
    #[error("stored value under `{key}` cannot be decoded: {detail}")]
    Undecodable { key: String, detail: String },
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Text to show the user for a failed operation.
///
/// Validation and permission errors explain themselves; storage failures
/// collapse to [`STORAGE_NOTICE`].
pub trait Notice {
    fn notice(&self) -> String;
}

impl Notice for StoreError {
    fn notice(&self) -> String {
        STORAGE_NOTICE.to_owned()
    }
}

/// String key-value storage with `localStorage` semantics.
pub trait KvStore {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

/// Read and decode the JSON value under `key`, or `fallback` when the key is
/// absent, unreadable or corrupt.
pub fn read_json<S, T>(store: &S, key: &str, fallback: T) -> T
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get_item(key) {
        Ok(Some(raw)) if !raw.is_empty() => raw,
        Ok(_) => return fallback,
        Err(e) => {
            tracing::error!(key, error = %e, "read_json: storage read failed");
            return fallback;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(key, error = %e, "read_json: stored value is not valid JSON");
            fallback
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if encoding fails or the store rejects the write; the
/// failure is logged before it is returned.
pub fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    S: KvStore + ?Sized,
    T: Serialize + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(StoreError::from)
        .and_then(|raw| store.set_item(key, &raw));
    if let Err(e) = &result {
        tracing::error!(key, error = %e, "write_json: storage write failed (maybe storage full)");
    }
    result
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Single-tab in-memory store with an optional byte quota.
///
/// The quota counts key plus value bytes across all entries, which is close
/// enough to how browsers account `localStorage` to exercise the
/// storage-full path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once `bytes` would be exceeded.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { items: RefCell::default(), quota: Some(bytes) }
    }

    fn used_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            if self.used_without(key) + key.len() + value.len() > quota {
                return Err(StoreError::QuotaExceeded { key: key.to_owned() });
            }
        }
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
