//! Key-value storage backends
//!
//! The store only needs string values under string keys, the same surface
//! a browser's local storage offers. [`MemoryStorage`] keeps everything in
//! process and can enforce a byte quota; [`crate::FileStorage`] maps keys to
//! files.

use crate::config::StoreConfig;
use crate::error::StorageError;
use std::collections::HashMap;

/// String key-value backend
pub trait KeyValueStorage {
    /// Read the value under `key`, `None` if never written
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`
    ///
    /// # Errors
    /// Returns error if the write is rejected; the previous value is kept
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`; deleting an absent key is not an error
    ///
    /// # Errors
    /// Returns error if the backend cannot be modified
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-process storage with an optional byte quota
///
/// Usage is counted as key bytes plus value bytes over all entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create empty, unbounded storage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create empty storage limited to `bytes`
    #[inline]
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Create empty storage limited by `config.quota_bytes`, if set
    #[inline]
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            entries: HashMap::new(),
            quota: config.quota_bytes,
        }
    }

    /// Change the quota; existing entries are kept even if now over it
    #[inline]
    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Bytes currently held
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Raw value under `key`
    #[inline]
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let required = self.used_bytes() - existing + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded { required, quota });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "[1]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.used_bytes(), 4);
    }

    #[test]
    fn quota_rejects_and_keeps_previous_value() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set("k", "12345").unwrap();

        let err = storage.set("k", "1234567890").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 11,
                quota: 10
            }
        ));
        assert_eq!(storage.raw("k"), Some("12345"));
    }

    #[test]
    fn config_quota_is_applied() {
        let mut storage = MemoryStorage::from_config(&StoreConfig::default().with_quota_bytes(4));
        assert!(storage.set("k", "123").is_ok());
        assert!(matches!(
            storage.set("k", "1234"),
            Err(StorageError::QuotaExceeded { quota: 4, .. })
        ));

        let mut unbounded = MemoryStorage::from_config(&StoreConfig::default());
        assert!(unbounded.set("k", &"x".repeat(10_000)).is_ok());
    }

    #[test]
    fn overwrite_counts_replaced_value_once() {
        let mut storage = MemoryStorage::with_quota(10);
        storage.set("k", "123456789").unwrap();
        storage.set("k", "987654321").unwrap();
        assert_eq!(storage.used_bytes(), 10);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }
}
