//! JSON file backend.
//!
//! The whole store is one JSON object (`{"key": "value", ...}`) kept in
//! memory and rewritten to disk after every mutation. Writes go to a
//! sibling temp file that is then renamed over the original, so a crash
//! mid-write leaves the previous document intact.

use crate::{KvStore, Result, StorageError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A durable store backed by a single JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`, creating parent directories if needed.
    ///
    /// A missing file is treated as an empty store; it is created on the
    /// first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    StorageError::Corruption(format!("{}: {}", path.display(), e))
                })?
            }
        } else {
            tracing::debug!(?path, "Store file not found, starting empty");
            BTreeMap::new()
        };

        tracing::debug!(?path, keys = data.len(), "Opened file store");

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(data)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.write();
        let previous = data.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(&data) {
            // Keep memory consistent with disk.
            match previous {
                Some(old) => data.insert(key.to_string(), old),
                None => data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut data = self.data.write();
        let Some(previous) = data.remove(key) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&data) {
            data.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(true)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.data.read().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert!(store.get("users").unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("users", "[]").unwrap();
            store.set("currentUser", "null").unwrap();
            assert!(store.remove("currentUser").unwrap());
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("users").unwrap().as_deref(), Some("[]"));
        assert!(reopened.get("currentUser").unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corruption(_)));
    }

    #[test]
    fn test_file_store_empty_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(!store.contains("users").unwrap());
    }
}
