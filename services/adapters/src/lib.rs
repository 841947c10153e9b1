//! # Protocol Adapters
//!
//! Read-only DeFi protocol adapters. Each adapter covers one
//! (protocol, product, chain) and answers a fixed capability surface:
//! protocol details, protocol tokens, user positions, movements, TVL,
//! profits, yields and price per share.
//!
//! ## Architecture
//!
//! ```text
//! bin/adapters ──► registry ──► ProtocolAdapter (protocols::*)
//!                                  │          │
//!                                  │          └─► Memoized metadata (metadata-cache)
//!                                  ▼
//!                      contracts (ethabi) ──► rpc::ContractReader ──► web3
//! ```
//!
//! Static metadata (which tokens a contract wraps, their decimals) is built
//! once per key and persisted; live balances are read on every call with the
//! independent reads issued concurrently.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adapters_config::load_config;
//! use metadata_cache::MetadataCache;
//! use protocol_adapters::{build_registry, portfolio};
//! use std::sync::Arc;
//! use types::{Address, GetPositionsInput};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config(None)?;
//! let cache = Arc::new(MetadataCache::with_file_store(&config.global.cache_dir));
//! let registry = build_registry(&config, cache)?;
//!
//! let input = GetPositionsInput {
//!     user_address: Address::from_low_u64_be(1),
//!     block_number: None,
//! };
//! for result in portfolio::positions(&registry.all(), &input).await {
//!     println!("{}: {:?}", result.adapter, result.outcome);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod contracts;
pub mod error;
pub mod portfolio;
pub mod protocols;
pub mod registry;
pub mod rpc;

pub use adapter::{AdapterKey, AdapterParams, Capability, ProtocolAdapter};
pub use error::{AdapterError, Result, Support, SupportExt};
pub use registry::{build_registry, build_registry_with_readers, AdapterRegistry};
pub use rpc::{ContractReader, RpcError, Web3Reader};
