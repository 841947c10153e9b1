//! Cache Persistence Tests
//!
//! Ensures built metadata lands on disk and is served from there after a restart

use metadata_cache::{memoize, CacheKey, FileStore, KeyedStore, MetadataCache};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VestingMetadata {
    contract_symbol: String,
    underlying_symbol: String,
    decimals: u8,
}

fn vesting_metadata() -> VestingMetadata {
    VestingMetadata {
        contract_symbol: "veSTG".to_string(),
        underlying_symbol: "STG".to_string(),
        decimals: 18,
    }
}

fn key(chain: &str) -> CacheKey {
    CacheKey::new("stargate", "vesting", chain, "vesting-token").unwrap()
}

fn counted(
    cache: Arc<MetadataCache>,
    chain: &str,
    calls: Arc<AtomicUsize>,
) -> metadata_cache::Memoized<
    metadata_cache::FnBuilder<
        impl Fn() -> futures::future::Ready<Result<VestingMetadata, String>>
            + Send
            + Sync
            + 'static,
    >,
> {
    memoize(cache, key(chain), move || {
        calls.fetch_add(1, Ordering::SeqCst);
        futures::future::ready(Ok(vesting_metadata()))
    })
}

#[tokio::test]
async fn test_cache_persistence_across_restarts() {
    println!("🧪 Testing metadata persistence across restarts");

    let temp_dir = TempDir::new().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));

    // Phase 1: first process builds and persists
    {
        let cache = Arc::new(MetadataCache::with_file_store(temp_dir.path()));
        let memo = counted(cache, "ethereum", calls.clone());

        assert_eq!(memo.get().await.unwrap(), vesting_metadata());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        println!("✅ Phase 1: metadata built and saved");
    }

    // Phase 2: a fresh cache over the same directory never calls the builder
    {
        let cache = Arc::new(MetadataCache::with_file_store(temp_dir.path()));
        let memo = counted(cache.clone(), "ethereum", calls.clone());

        assert_eq!(memo.get().await.unwrap(), vesting_metadata());
        assert_eq!(memo.get().await.unwrap(), vesting_metadata());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.stats().hits, 2);

        println!("✅ Phase 2: metadata served from disk");
    }

    let cache_file = temp_dir
        .path()
        .join("stargate")
        .join("vesting")
        .join("ethereum.vesting-token.json");
    assert!(cache_file.exists(), "Cache file should exist");

    let contents = std::fs::read_to_string(&cache_file).unwrap();
    assert!(contents.contains("\"contractSymbol\": \"veSTG\""));

    println!("✅ Cache file verified at {:?}", cache_file);
}

#[tokio::test]
async fn test_chains_do_not_share_entries() {
    let temp_dir = TempDir::new().unwrap();
    let cache = Arc::new(MetadataCache::with_file_store(temp_dir.path()));
    let calls = Arc::new(AtomicUsize::new(0));

    counted(cache.clone(), "ethereum", calls.clone()).get().await.unwrap();
    counted(cache.clone(), "arbitrum", calls.clone()).get().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let store = FileStore::new(temp_dir.path());
    assert!(store.read(&key("ethereum")).await.unwrap().is_some());
    assert!(store.read(&key("arbitrum")).await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_write_forfeits_hits_across_restart() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocked");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let calls = Arc::new(AtomicUsize::new(0));

    {
        let cache = Arc::new(MetadataCache::with_file_store(&blocker));
        let memo = counted(cache.clone(), "ethereum", calls.clone());

        // The caller still gets the value
        assert_eq!(memo.get().await.unwrap(), vesting_metadata());
        assert_eq!(cache.stats().write_failures, 1);
    }

    {
        let cache = Arc::new(MetadataCache::with_file_store(&blocker));
        let memo = counted(cache, "ethereum", calls.clone());

        assert_eq!(memo.get().await.unwrap(), vesting_metadata());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}

#[tokio::test]
async fn test_deleted_file_is_rebuilt() {
    let temp_dir = TempDir::new().unwrap();
    let cache = Arc::new(MetadataCache::with_file_store(temp_dir.path()));
    let calls = Arc::new(AtomicUsize::new(0));

    counted(cache, "ethereum", calls.clone()).get().await.unwrap();

    let path = FileStore::new(temp_dir.path()).path_for(&key("ethereum"));
    std::fs::remove_file(&path).unwrap();

    // New process, entry removed by hand
    let cache = Arc::new(MetadataCache::with_file_store(temp_dir.path()));
    counted(cache, "ethereum", calls.clone()).get().await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(path.exists());
}
