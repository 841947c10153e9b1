//! In-process store for ephemeral runs and tests

use super::{CacheEntry, KeyedStore};
use crate::error::Result;
use crate::key::CacheKey;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<CacheKey, CacheEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl KeyedStore for MemoryStore {
    async fn read(&self, key: &CacheKey) -> Result<Option<CacheEntry>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn write(&self, key: &CacheKey, payload: Value) -> Result<CacheEntry> {
        let entry = CacheEntry::new(key.clone(), payload);
        self.entries.insert(key.clone(), entry.clone());
        Ok(entry)
    }

    async fn remove(&self, key: &CacheKey) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn describe(&self) -> String {
        format!("memory:{} entries", self.entries.len())
    }
}
