//! # Adapters Configuration
//!
//! Configuration management and defaults for protocol adapters.
//!
//! ## Features
//!
//! - **Chains**: RPC endpoint and timeout per chain
//! - **Protocols**: per-product contract address overrides
//! - **Global**: metadata cache location, persistence switch, log level
//!
//! Sources are layered: the base TOML file, an optional
//! `environments/<env>.toml` next to it, then `ADAPTERS_` environment
//! variables (`ADAPTERS_CHAINS__ETHEREUM__RPC_URL=...`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use adapters_config::load_config;
//! use types::Chain;
//!
//! let config = load_config(Some("production")).unwrap();
//! let rpc = &config.chain(Chain::Ethereum).unwrap().rpc_url;
//! ```

pub mod defaults;
pub mod settings;

pub use settings::{load_config, AdaptersConfig, ChainConfig, GlobalConfig, ProductConfig};
