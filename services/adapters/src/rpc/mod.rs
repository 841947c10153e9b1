//! RPC collaborator boundary
//!
//! Everything that talks to a node goes through [`ContractReader`]: a single
//! read-only `eth_call`. Contract bindings, token metadata resolution and
//! adapters are written against the trait, so tests swap in a scripted reader.

mod reader;

pub mod icon;
pub mod token_metadata;

pub use reader::Web3Reader;

use async_trait::async_trait;
use thiserror::Error;
use types::Address;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Call to {to:?} reverted: {reason}")]
    Reverted { to: Address, reason: String },

    #[error("ABI error: {0}")]
    Abi(#[from] ethabi::Error),

    #[error("Failed to decode {what} from {to:?}: {reason}")]
    Decode {
        to: Address,
        what: String,
        reason: String,
    },

    #[error("Invalid RPC endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

#[async_trait]
pub trait ContractReader: Send + Sync {
    /// `eth_call` against `to`, at `block` or latest when `None`
    async fn call(
        &self,
        to: Address,
        calldata: Vec<u8>,
        block: Option<u64>,
    ) -> Result<Vec<u8>, RpcError>;
}
