//! JSON helpers for typed values.

use crate::{KvStore, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Reads and decodes the JSON value stored under `key`.
///
/// Returns `Ok(None)` when the key is absent.
pub fn get_json<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn set_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, StorageError};
    use std::collections::BTreeMap;

    #[test]
    fn test_json_map_value() {
        let store = MemoryStore::new();
        let mut map = BTreeMap::new();
        map.insert("jane@example.com".to_string(), "Abcdef12".to_string());

        set_json(&store, "passwords", &map).unwrap();
        assert_eq!(
            store.get("passwords").unwrap().as_deref(),
            Some(r#"{"jane@example.com":"Abcdef12"}"#)
        );

        let loaded: Option<BTreeMap<String, String>> = get_json(&store, "passwords").unwrap();
        assert_eq!(loaded, Some(map));
    }

    #[test]
    fn test_json_absent_and_invalid() {
        let store = MemoryStore::with_entries([("users", "{broken")]);

        let missing: Option<Vec<String>> = get_json(&store, "nothing").unwrap();
        assert!(missing.is_none());

        let err = get_json::<Vec<String>, _>(&store, "users").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
