//! RocksDB persistent storage backend.
//!
//! Keys and values are stored as UTF-8 bytes in the default column
//! family. Every write goes through the WAL, so a value is durable as
//! soon as `set` returns.

use crate::{KvStore, Result, StorageError};
use rocksdb::{DBWithThreadMode, MultiThreaded, Options, WriteOptions};
use std::path::{Path, PathBuf};

/// RocksDB storage configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory.
    pub path: PathBuf,

    /// Write buffer size in bytes.
    pub write_buffer_size: usize,

    /// Enable LZ4 compression.
    pub compression_enabled: bool,

    /// Fsync every write instead of relying on the WAL alone.
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/rocksdb"),
            write_buffer_size: 4 * 1024 * 1024, // 4 MB
            compression_enabled: true,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key/value store.
pub struct RocksDbStore {
    db: DBWithThreadMode<MultiThreaded>,
    config: RocksDbConfig,
}

impl std::fmt::Debug for RocksDbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksDbStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn backend_err(e: rocksdb::Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

impl RocksDbStore {
    /// Opens or creates a RocksDB database.
    pub fn open(config: RocksDbConfig) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);

        if config.compression_enabled {
            opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
        }

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, &config.path).map_err(backend_err)?;

        tracing::debug!(path = %config.path.display(), "Opened RocksDB store");

        Ok(Self { db, config })
    }

    /// Opens with default configuration.
    pub fn open_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(RocksDbConfig {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl KvStore for RocksDbStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.db.get(key.as_bytes()).map_err(backend_err)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| StorageError::Corruption(format!("non-UTF-8 value for key '{}'", key))),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .put_opt(key.as_bytes(), value.as_bytes(), &self.write_options())
            .map_err(backend_err)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let existed = self.contains(key)?;
        if existed {
            self.db
                .delete_opt(key.as_bytes(), &self.write_options())
                .map_err(backend_err)?;
        }
        Ok(existed)
    }

    fn contains(&self, key: &str) -> Result<bool> {
        self.db
            .get_pinned(key.as_bytes())
            .map(|opt| opt.is_some())
            .map_err(backend_err)
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(backend_err)
    }
}
