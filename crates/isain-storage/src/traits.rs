//! Storage backend traits.
//!
//! Defines the interface that all key/value backends must implement,
//! so callers can swap a durable store for an in-memory one.

use crate::Result;
use std::sync::Arc;

/// A durable, string-keyed store with immediate read-after-write.
///
/// Implementations include in-memory, JSON file, and RocksDB storage.
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Returns true if a value was present.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Checks if a value exists under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Flush any pending writes to durable storage.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

// Implement KvStore for Arc<T> where T: KvStore
impl<T: KvStore + ?Sized> KvStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        (**self).contains(key)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    // Mock implementation for testing
    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StorageError::Backend("offline".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(StorageError::Backend("offline".into()))
        }

        fn remove(&self, _key: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_default_contains_propagates_errors() {
        let store = BrokenStore;
        assert!(store.contains("users").is_err());
        assert!(store.flush().is_ok());
    }

    #[test]
    fn test_arc_and_box_delegate() {
        let shared: Arc<dyn KvStore> = Arc::new(crate::MemoryStore::new());
        shared.set("k", "v").unwrap();
        assert_eq!(shared.get("k").unwrap(), Some("v".into()));

        let boxed: Box<dyn KvStore> = Box::new(BrokenStore);
        assert!(!boxed.remove("k").unwrap());
    }
}
