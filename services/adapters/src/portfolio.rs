//! Capability fan-out across many adapters
//!
//! Runs one capability on every adapter concurrently. Each adapter's outcome
//! is reported on its own: an adapter that lacks the capability is
//! `Unsupported`, one that errors is `Failed`, and neither stops the rest.

use crate::adapter::{AdapterKey, ProtocolAdapter};
use crate::error::{Result, Support, SupportExt};
use futures::future::join_all;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;
use types::{Erc20Metadata, GetPositionsInput, Token};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum Outcome<T> {
    Supported(T),
    Unsupported,
    Failed(String),
}

impl<T> Outcome<T> {
    pub fn supported(&self) -> Option<&T> {
        match self {
            Outcome::Supported(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdapterOutcome<T> {
    pub adapter: AdapterKey,
    pub outcome: Outcome<T>,
}

/// Invoke `call` on every adapter and collect per-adapter outcomes in input order
pub async fn collect<T, F, Fut>(
    adapters: &[Arc<dyn ProtocolAdapter>],
    call: F,
) -> Vec<AdapterOutcome<T>>
where
    F: Fn(Arc<dyn ProtocolAdapter>) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let calls = adapters.iter().map(|adapter| {
        let key = adapter.key().clone();
        let pending = call(adapter.clone());

        async move {
            let outcome = match pending.await.into_support() {
                Ok(Support::Supported(value)) => Outcome::Supported(value),
                Ok(Support::Unsupported) => Outcome::Unsupported,
                Err(e) => {
                    warn!("Adapter {} failed: {}", key, e);
                    Outcome::Failed(e.to_string())
                }
            };
            AdapterOutcome { adapter: key, outcome }
        }
    });

    join_all(calls).await
}

pub async fn positions(
    adapters: &[Arc<dyn ProtocolAdapter>],
    input: &GetPositionsInput,
) -> Vec<AdapterOutcome<Vec<Token>>> {
    collect(adapters, |adapter| {
        let input = input.clone();
        async move { adapter.get_positions(&input).await }
    })
    .await
}

pub async fn protocol_tokens(
    adapters: &[Arc<dyn ProtocolAdapter>],
) -> Vec<AdapterOutcome<Vec<Erc20Metadata>>> {
    collect(adapters, |adapter| async move { adapter.get_protocol_tokens().await }).await
}
