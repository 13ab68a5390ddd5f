//! Behaviour shared by every key/value backend.

use isain_storage::{get_json, set_json, FileStore, KvStore, MemoryStore};
use std::sync::Arc;
use tempfile::TempDir;

fn exercise(store: &dyn KvStore) {
    assert!(store.get("users").unwrap().is_none());
    assert!(!store.contains("users").unwrap());

    store.set("users", "[]").unwrap();
    assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));

    store.set("users", r#"[{"id":"1"}]"#).unwrap();
    assert_eq!(store.get("users").unwrap().as_deref(), Some(r#"[{"id":"1"}]"#));

    assert!(store.remove("users").unwrap());
    assert!(!store.remove("users").unwrap());
    store.flush().unwrap();
}

#[test]
fn test_memory_backend() {
    exercise(&MemoryStore::new());
}

#[test]
fn test_file_backend() {
    let dir = TempDir::new().unwrap();
    exercise(&FileStore::open(dir.path().join("store.json")).unwrap());
}

#[cfg(feature = "rocksdb-backend")]
#[test]
fn test_rocksdb_backend() {
    let dir = TempDir::new().unwrap();
    exercise(&isain_storage::RocksDbStore::open_default(dir.path()).unwrap());
}

#[test]
fn test_shared_store_sees_writes() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FileStore::open(dir.path().join("store.json")).unwrap());
    let other = Arc::clone(&store);

    set_json(&store, "destinationRatings", &serde_json::json!({ "1": 4 })).unwrap();
    let ratings: Option<serde_json::Value> = get_json(&other, "destinationRatings").unwrap();
    assert_eq!(ratings.unwrap()["1"], 4);
}

#[test]
fn test_file_document_is_plain_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let store = FileStore::open(&path).unwrap();
    store.set("currentUser", r#"{"email":"a@b.co"}"#).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["currentUser"], r#"{"email":"a@b.co"}"#);
}
