//! Error types for the metadata cache

use crate::key::CacheKey;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures of the persistent medium.
///
/// None of these ever reach a metadata caller: a failed read is a miss and a
/// failed write only forfeits future hits.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize cache entry: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid cache key segment {segment:?}: {reason}")]
    InvalidKey {
        segment: String,
        reason: &'static str,
    },

    #[error("Cache entry at {path:?} belongs to {found}, expected {expected}")]
    KeyMismatch {
        path: PathBuf,
        expected: CacheKey,
        found: CacheKey,
    },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
