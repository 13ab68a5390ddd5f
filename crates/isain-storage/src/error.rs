//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored data is unreadable (bad document, non-UTF-8 value).
    #[error("corruption detected: {0}")]
    Corruption(String),

    /// The underlying database reported an error.
    #[error("backend error: {0}")]
    Backend(String),
}
