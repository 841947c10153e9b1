//! # Metadata Cache
//!
//! Persistent memoization for the static, per-deployment metadata a protocol
//! adapter needs before it can do anything useful: which token a contract
//! wraps, its symbol and decimals. Building that data costs several RPC
//! round-trips and the answer never changes for a given deployment, so it is
//! resolved once per key and read back from disk on every later run.
//!
//! ## Layout
//!
//! - [`CacheKey`]: protocol, product, chain and scope; maps to a stable path
//! - [`KeyedStore`]: the medium, with [`FileStore`] (JSON files) and
//!   [`MemoryStore`] implementations
//! - [`MetadataBuilder`]: the business logic that produces a value
//! - [`MetadataCache`] / [`Memoized`]: composition of the three
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metadata_cache::{memoize, CacheKey, MetadataCache};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let cache = Arc::new(MetadataCache::with_file_store("./data/metadata"));
//! let key = CacheKey::new("stargate", "vesting", "ethereum", "vesting-token")?;
//!
//! let decimals = memoize(cache, key, || async { Ok::<u8, String>(18) });
//! assert_eq!(decimals.get().await?, 18);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod key;
pub mod memo;
pub mod store;

pub use builder::{FnBuilder, MetadataBuilder};
pub use error::{Result, StorageError};
pub use key::CacheKey;
pub use memo::{memoize, CacheStats, Memoized, MetadataCache};
pub use store::{CacheEntry, FileStore, KeyedStore, MemoryStore};
