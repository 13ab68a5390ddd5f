//! CLI settings.
//!
//! Layered, lowest precedence first:
//! 1. built-in defaults
//! 2. `isain.toml` in the data directory (optional)
//! 3. `ISAIN_*` environment variables (e.g. `ISAIN_BACKEND=memory`)
//! 4. command-line flags

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional settings file inside the data directory.
pub const SETTINGS_FILE: &str = "isain.toml";

/// Which key/value backend to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON document at `<data_dir>/store.json`.
    File,
    /// Nothing persists past the process.
    Memory,
    /// RocksDB database at `<data_dir>/rocksdb`.
    Rocksdb,
}

/// Resolved CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Where the store and settings file live.
    pub data_dir: PathBuf,
    /// Storage backend.
    pub backend: Backend,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log format (pretty or json).
    pub log_format: String,
}

impl Settings {
    /// Default data directory: the platform data dir, or `./.isain`.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|p| p.join("isain"))
            .unwrap_or_else(|| PathBuf::from(".isain"))
    }

    /// Load settings for `data_dir` (or the environment/default one).
    pub fn load(data_dir: Option<&Path>) -> Result<Self, config::ConfigError> {
        let base = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::var_os("ISAIN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(Self::default_data_dir),
        };

        let mut builder = config::Config::builder()
            .set_default("data_dir", base.to_string_lossy().as_ref())?
            .set_default("backend", "file")?
            .set_default("log_level", "warn")?
            .set_default("log_format", "pretty")?
            .add_source(config::File::from(base.join(SETTINGS_FILE)).required(false))
            .add_source(config::Environment::with_prefix("ISAIN"));

        if let Some(dir) = data_dir {
            builder = builder.set_override("data_dir", dir.to_string_lossy().as_ref())?;
        }

        builder.build()?.try_deserialize()
    }

    /// Path of the JSON store document.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.json")
    }

    /// Path of the RocksDB directory.
    #[cfg_attr(not(feature = "rocksdb-backend"), allow(dead_code))]
    pub fn rocksdb_path(&self) -> PathBuf {
        self.data_dir.join("rocksdb")
    }
}
