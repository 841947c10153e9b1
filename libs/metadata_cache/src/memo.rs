//! Memoizing wrapper around metadata builders
//!
//! [`MetadataCache`] is shared by every adapter in a process. It keeps a
//! decoded-JSON memory layer in front of a [`KeyedStore`], and a per-key gate
//! so that concurrent misses on one key invoke the builder once.
//!
//! Failure policy:
//! - builder errors go back to the caller untouched and nothing is stored
//! - a store read that fails (or a payload that no longer decodes) is a miss
//! - a store write that fails is logged and counted; the freshly built value
//!   is still returned, only future hits are forfeited

use crate::builder::{FnBuilder, MetadataBuilder};
use crate::error::Result as StorageResult;
use crate::key::CacheKey;
use crate::store::{FileStore, KeyedStore, MemoryStore};
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    /// Lookups that ended up invoking the builder
    pub misses: u64,
    pub builds: u64,
    pub build_failures: u64,
    pub write_failures: u64,
    pub memory_entries: usize,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    builds: AtomicU64,
    build_failures: AtomicU64,
    write_failures: AtomicU64,
}

pub struct MetadataCache {
    store: Arc<dyn KeyedStore>,
    memory: DashMap<CacheKey, Value>,
    inflight: DashMap<CacheKey, Arc<Mutex<()>>>,
    counters: Counters,
}

impl MetadataCache {
    pub fn new(store: Arc<dyn KeyedStore>) -> Self {
        Self {
            store,
            memory: DashMap::new(),
            inflight: DashMap::new(),
            counters: Counters::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn with_file_store(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(root)))
    }

    pub fn store(&self) -> &Arc<dyn KeyedStore> {
        &self.store
    }

    /// Return the cached value for `key`, running `build` only on a miss
    pub async fn get_or_build<T, E, F, Fut>(&self, key: &CacheKey, build: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned + Send,
        E: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
    {
        if let Some(value) = self.lookup(key).await {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Metadata cache hit for {}", key);
            return Ok(value);
        }

        let gate = self.gate(key);
        let result = {
            let _guard = gate.lock().await;

            // Another caller may have completed the build while we waited
            match self.lookup(key).await {
                Some(value) => {
                    self.counters.hits.fetch_add(1, Ordering::Relaxed);
                    debug!("Metadata cache hit for {} after waiting on in-flight build", key);
                    Ok(value)
                }
                None => {
                    self.counters.misses.fetch_add(1, Ordering::Relaxed);
                    self.build_and_persist(key, build).await
                }
            }
        };
        self.release_gate(key, &gate);

        result
    }

    /// Run `build` unconditionally and overwrite the entry on success.
    ///
    /// A failed rebuild leaves the previous entry in place.
    pub async fn rebuild<T, E, F, Fut>(&self, key: &CacheKey, build: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned + Send,
        E: Send,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
    {
        let gate = self.gate(key);
        let result = {
            let _guard = gate.lock().await;
            self.build_and_persist(key, build).await
        };
        self.release_gate(key, &gate);

        result
    }

    /// Drop both the in-process copy and the stored entry
    pub async fn invalidate(&self, key: &CacheKey) -> StorageResult<bool> {
        let in_memory = self.memory.remove(key).is_some();
        let stored = self.store.remove(key).await?;
        if in_memory || stored {
            info!("Invalidated cached metadata for {}", key);
        }
        Ok(in_memory || stored)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            builds: self.counters.builds.load(Ordering::Relaxed),
            build_failures: self.counters.build_failures.load(Ordering::Relaxed),
            write_failures: self.counters.write_failures.load(Ordering::Relaxed),
            memory_entries: self.memory.len(),
        }
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let cached = self.memory.get(key).map(|entry| entry.value().clone());
        if let Some(payload) = cached {
            match serde_json::from_value(payload) {
                Ok(value) => return Some(value),
                Err(e) => {
                    warn!("Cached metadata for {} does not decode, dropping: {}", key, e);
                    self.memory.remove(key);
                }
            }
        }

        match self.store.read(key).await {
            Ok(Some(entry)) => match serde_json::from_value(entry.payload.clone()) {
                Ok(value) => {
                    self.memory.insert(key.clone(), entry.payload);
                    Some(value)
                }
                Err(e) => {
                    warn!("Stored metadata for {} does not decode, rebuilding: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(
                    "Failed to read metadata for {} from {}, treating as miss: {}",
                    key,
                    self.store.describe(),
                    e
                );
                None
            }
        }
    }

    async fn build_and_persist<T, E, F, Fut>(&self, key: &CacheKey, build: F) -> Result<T, E>
    where
        T: Serialize + Send,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        info!("Building metadata for {}", key);

        let value = match build().await {
            Ok(value) => value,
            Err(e) => {
                self.counters.build_failures.fetch_add(1, Ordering::Relaxed);
                warn!("Metadata build failed for {}; nothing cached", key);
                return Err(e);
            }
        };
        self.counters.builds.fetch_add(1, Ordering::Relaxed);

        match serde_json::to_value(&value) {
            Ok(payload) => self.persist(key, payload).await,
            Err(e) => {
                self.counters.write_failures.fetch_add(1, Ordering::Relaxed);
                warn!("Metadata for {} is not serializable, not caching: {}", key, e);
            }
        }

        Ok(value)
    }

    async fn persist(&self, key: &CacheKey, payload: Value) {
        self.memory.insert(key.clone(), payload.clone());

        if let Err(e) = self.store.write(key, payload).await {
            self.counters.write_failures.fetch_add(1, Ordering::Relaxed);
            warn!(
                "Failed to persist metadata for {} to {}: {}",
                key,
                self.store.describe(),
                e
            );
        }
    }

    fn gate(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        let entry = self
            .inflight
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }

    fn release_gate(&self, key: &CacheKey, gate: &Arc<Mutex<()>>) {
        // Two references means only the map and this caller remain
        self.inflight.remove_if(key, |_, current| {
            Arc::ptr_eq(current, gate) && Arc::strong_count(current) <= 2
        });
    }
}

/// A builder bound to its cache key and a shared [`MetadataCache`]
pub struct Memoized<B: MetadataBuilder> {
    cache: Arc<MetadataCache>,
    key: CacheKey,
    builder: B,
}

impl<B: MetadataBuilder> Memoized<B> {
    pub fn new(cache: Arc<MetadataCache>, key: CacheKey, builder: B) -> Self {
        Self {
            cache,
            key,
            builder,
        }
    }

    pub async fn get(&self) -> Result<B::Metadata, B::Error> {
        self.cache
            .get_or_build(&self.key, || self.builder.build_metadata())
            .await
    }

    pub async fn rebuild(&self) -> Result<B::Metadata, B::Error> {
        self.cache
            .rebuild(&self.key, || self.builder.build_metadata())
            .await
    }

    pub async fn invalidate(&self) -> StorageResult<bool> {
        self.cache.invalidate(&self.key).await
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn builder(&self) -> &B {
        &self.builder
    }

    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }
}

/// Function form: bind an async closure to a key
pub fn memoize<F, Fut, T, E>(
    cache: Arc<MetadataCache>,
    key: CacheKey,
    build: F,
) -> Memoized<FnBuilder<F>>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    E: Send + 'static,
{
    Memoized::new(cache, key, FnBuilder::new(build))
}
