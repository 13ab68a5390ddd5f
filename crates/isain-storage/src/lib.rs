//! Key/value persistence for Isain.
//!
//! This crate provides the string-keyed store that client state lives in,
//! together with a handful of backends:
//! - **MemoryStore**: in-process map, used by tests and throwaway sessions
//! - **FileStore**: a single JSON document on disk, rewritten on each write
//! - **RocksDbStore**: RocksDB-backed store (requires `rocksdb-backend`)
//!
//! Values are plain strings; [`get_json`] and [`set_json`] layer JSON
//! encoding on top for typed records.
//!
//! # Example
//!
//! ```
//! use isain_storage::{get_json, set_json, KvStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! set_json(&store, "answer", &42u32).unwrap();
//!
//! let value: Option<u32> = get_json(&store, "answer").unwrap();
//! assert_eq!(value, Some(42));
//! assert!(store.remove("answer").unwrap());
//! ```

mod error;
mod file;
mod json;
mod memory;
mod traits;

#[cfg(feature = "rocksdb-backend")]
mod rocks;

pub use error::StorageError;
pub use file::FileStore;
pub use json::{get_json, set_json};
pub use memory::MemoryStore;
pub use traits::KvStore;

#[cfg(feature = "rocksdb-backend")]
pub use rocks::{RocksDbConfig, RocksDbStore};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
