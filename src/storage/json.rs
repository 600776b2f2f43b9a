//! JSON file-backed key-value store.
//!
//! The whole store is one human-readable JSON document kept in memory and
//! rewritten on every mutation using an atomic write (temp file + rename), so a
//! crash mid-write never leaves a truncated file behind.

use crate::domain::error::{DexError, Result};
use crate::storage::backend::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// On-disk container format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    /// Format version for future migrations.
    version: u32,

    /// Time of the last successful write.
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: 1,
            updated_at: None,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": "2024-05-01T12:00:00Z",
///   "entries": {
///     "pokemonFavorites": "[{\"id\":25,\"name\":\"pikachu\", ...}]"
///   }
/// }
/// ```
///
/// A file that exists but cannot be read or parsed is logged and treated as empty. It is
/// replaced on the next write.
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreFile,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created. An existing
    /// file that cannot be read or parsed is not an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dexview::storage::{JsonFileStore, KeyValueStore};
    /// use std::path::PathBuf;
    ///
    /// let store = JsonFileStore::open(PathBuf::from("/tmp/dexview/store.json"))?;
    /// let favorites = store.get("pokemonFavorites")?;
    /// # Ok::<(), dexview::DexError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)
        } else {
            tracing::debug!("no store file yet, starting empty");
            StoreFile::default()
        };

        tracing::debug!(entries = data.entries.len(), "store opened");

        Ok(Self { file_path, data })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> StoreFile {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "store file is unreadable, starting empty");
                return StoreFile::default();
            }
        };
        match serde_json::from_str::<StoreFile>(&contents) {
            Ok(data) => {
                tracing::debug!(version = data.version, "loaded store file");
                data
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "store file is corrupt, starting empty");
                StoreFile::default()
            }
        }
    }

    fn save_to_file(&mut self) -> Result<()> {
        self.data.updated_at = Some(Utc::now());

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| DexError::Storage(format!("failed to serialize store: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, bytes = value.len()).entered();

        self.data.entries.insert(key.to_string(), value);
        self.save_to_file()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.data.entries.remove(key).is_some() {
            self.save_to_file()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("file_path", &self.file_path)
            .field("entries", &self.data.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("greeting", "hello".to_string()).unwrap();
        drop(store);

        let reopened = JsonFileStore::open(path).unwrap();
        assert_eq!(reopened.get("greeting").unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn corrupt_file_opens_empty_and_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        assert_eq!(store.get("anything").unwrap(), None);

        store.set("k", "v".to_string()).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["entries"]["k"], "v");
        assert!(parsed["updated_at"].is_string());
    }

    #[test]
    fn non_utf8_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        let store = JsonFileStore::open(path).unwrap();
        assert_eq!(store.get("pokemonFavorites").unwrap(), None);
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.set("k", "v".to_string()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn removing_missing_key_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = JsonFileStore::open(path.clone()).unwrap();
        store.remove("missing").unwrap();
        assert!(!path.exists());
    }
}
