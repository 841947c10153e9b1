//! Persistent keyed storage for built metadata
//!
//! Stores are dumb: they map a [`CacheKey`] to the last payload written for it.
//! There is no TTL and no eviction; an entry lives until it is overwritten by a
//! rebuild or removed explicitly.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::key::CacheKey;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored payload. Never mutated in place; a rebuild replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub key: CacheKey,
    pub payload: Value,
    pub written_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(key: CacheKey, payload: Value) -> Self {
        Self {
            key,
            payload,
            written_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait KeyedStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`; errors are reserved for
    /// a medium that exists but cannot be read or decoded.
    async fn read(&self, key: &CacheKey) -> Result<Option<CacheEntry>>;

    /// Replace whatever is stored under `key`
    async fn write(&self, key: &CacheKey, payload: Value) -> Result<CacheEntry>;

    /// Returns whether an entry existed
    async fn remove(&self, key: &CacheKey) -> Result<bool>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}
