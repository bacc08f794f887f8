//! In-process key/value backend.

use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::error::StorageError;

/// Map-backed store with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, which mirrors
/// how browsers account local storage. A disabled store rejects every
/// operation with [`StorageError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    /// Creates an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that refuses writes beyond `quota_bytes`.
    #[must_use]
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Creates a store whose every operation fails, like storage blocked
    /// by browser privacy settings.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            Err(StorageError::Unavailable("storage is disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        let map = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        let mut map = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        if let Some(limit) = self.quota_bytes {
            let others: usize = map
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len().saturating_add(v.len()))
                .sum();
            let needed = others.saturating_add(key.len()).saturating_add(value.len());
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        let mut map = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        map.remove(key);
        Ok(())
    }
}
