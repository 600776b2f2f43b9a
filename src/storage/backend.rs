//! Key-value store abstraction.
//!
//! The viewer persists exactly one value today (the favorites blob), but the
//! store is modeled after a host key-value facility: string keys mapping to
//! string values, overwritten wholesale on every write.

use crate::domain::error::{DexError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Abstraction over persistent string storage.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): JSON file with atomic writes (default)
/// - [`MemoryStore`]: process-local map, used in tests and as a fallback when the
///   data directory is unusable
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn set(&mut self, key: &str, value: String) -> Result<()>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory [`KeyValueStore`].
///
/// Clones share the same underlying map, so a test can keep a handle while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|e| DexError::Storage(format!("memory store poisoned: {e}")))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let mut writer = MemoryStore::new();
        let reader = writer.clone();

        writer.set("k", "v".to_string()).unwrap();
        assert_eq!(reader.get("k").unwrap().as_deref(), Some("v"));

        writer.remove("k").unwrap();
        assert_eq!(reader.get("k").unwrap(), None);
    }
}
