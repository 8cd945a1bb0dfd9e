// ABOUTME: Durable key-value storage used to persist the assessment draft
// A single key holds a JSON document; stores are synchronous and last-write-wins

pub mod file_store;
pub mod memory_store;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Errors raised by a key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key was empty or sanitised down to nothing
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading the value for a key failed
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the value for a key failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Removing a key failed
    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Synchronous string key-value store.
///
/// Mirrors the browser's local storage contract: values are opaque strings,
/// `set` overwrites, and removing an absent key succeeds.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key` if present
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Whether a value exists under `key`
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
