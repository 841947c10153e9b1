//! Error types for the adapters module

use crate::adapter::Capability;
use crate::rpc::RpcError;
use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Main error type for adapter operations
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The capability does not apply to this protocol product.
    ///
    /// Expected and non-fatal: callers skip it and move on.
    #[error("{capability} is not implemented by this adapter")]
    NotImplemented { capability: Capability },

    /// The RPC collaborator failed; never retried or cached here
    #[error("Upstream call failed: {0}")]
    Upstream(#[from] RpcError),

    /// Configuration or on-chain data that cannot be right, e.g. no
    /// contract address for the adapter's chain
    #[error("Data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AdapterError {
    pub fn not_implemented(capability: Capability) -> Self {
        AdapterError::NotImplemented { capability }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, AdapterError::NotImplemented { .. })
    }
}

/// Tagged outcome of invoking a capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Support<T> {
    Supported(T),
    Unsupported,
}

impl<T> Support<T> {
    pub fn supported(self) -> Option<T> {
        match self {
            Support::Supported(value) => Some(value),
            Support::Unsupported => None,
        }
    }
}

/// Turns `NotImplemented` into [`Support::Unsupported`]; every other error
/// stays an error.
pub trait SupportExt<T> {
    fn into_support(self) -> Result<Support<T>>;
}

impl<T> SupportExt<T> for Result<T> {
    fn into_support(self) -> Result<Support<T>> {
        match self {
            Ok(value) => Ok(Support::Supported(value)),
            Err(AdapterError::NotImplemented { .. }) => Ok(Support::Unsupported),
            Err(e) => Err(e),
        }
    }
}
