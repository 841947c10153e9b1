//! The metadata builder contract
//!
//! A builder is plain business logic: it resolves identity data (token
//! addresses, decimals) through the RPC layer and knows nothing about keys,
//! storage or when it gets called. [`crate::Memoized`] supplies all of that.
//!
//! Builders must be safe to run concurrently with themselves. The cache
//! coalesces concurrent misses inside one process, but separate processes
//! sharing a store can still race on the same key.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

#[async_trait]
pub trait MetadataBuilder: Send + Sync {
    /// Must round-trip through JSON and stay readable across restarts
    type Metadata: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Returned to the caller unchanged and never cached
    type Error: Send + 'static;

    async fn build_metadata(&self) -> Result<Self::Metadata, Self::Error>;
}

/// Adapts an async closure into a [`MetadataBuilder`]
pub struct FnBuilder<F>(F);

impl<F> FnBuilder<F> {
    pub fn new(build: F) -> Self {
        Self(build)
    }
}

#[async_trait]
impl<F, Fut, T, E> MetadataBuilder for FnBuilder<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    E: Send + 'static,
{
    type Metadata = T;
    type Error = E;

    async fn build_metadata(&self) -> Result<T, E> {
        (self.0)().await
    }
}
