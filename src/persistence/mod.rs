//! Key-value persistence
//!
//! Backends:
//! - `MemoryStore`: in-process map (tests, fallback)
//! - `FileStore`: JSON file on disk (native)
//! - `LocalStorage`: browser LocalStorage (wasm)
//!
//! Storage is best effort. Callers go through `storage_get`/`storage_set`,
//! which log failures and fall back to defaults instead of surfacing them.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Storage failures (never shown to the player)
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage data invalid: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read `key`, falling back to `fallback` when missing or unreadable
pub fn storage_get(store: &dyn KeyValueStore, key: &str, fallback: &str) -> String {
    match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => fallback.to_string(),
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            fallback.to_string()
        }
    }
}

/// Write `key`, logging and ignoring failures
pub fn storage_set(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        log::warn!("Failed to write {}: {}", key, e);
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store that is never available (private browsing, blocked storage)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
