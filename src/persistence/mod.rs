//! Persistence layer: durable key/value backends and the token store.
//!
//! [`KeyValueStore`] is the storage seam (the equivalent of browser local
//! storage). [`TokenStore`] owns the token and profile slots on top of it
//! and turns every backend failure into a `bool`/`None` result.

pub mod file;
pub mod memory;
pub mod token_store;

use std::fmt;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use token_store::TokenStore;

use crate::error::StorageError;

/// A durable string-to-string map.
///
/// Every write is a complete overwrite of the key. Implementations must not
/// panic on backend failure; they return a [`StorageError`] instead.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend is unavailable or full.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
