//! # Protocol Adapter Contract
//!
//! One [`ProtocolAdapter`] exists per (protocol, product, chain). Every adapter
//! exposes the full capability surface; capabilities that do not apply to a
//! product keep the default body, which fails with
//! [`AdapterError::NotImplemented`] before touching the network.
//!
//! Callers that want to know what an adapter can do without invoking it ask
//! [`ProtocolAdapter::supports`]; callers that invoke blindly convert the
//! result with [`crate::SupportExt::into_support`].

use crate::error::{AdapterError, Result};
use crate::rpc::ContractReader;
use async_trait::async_trait;
use metadata_cache::MetadataCache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use types::{
    Chain, Erc20Metadata, GetAprInput, GetApyInput, GetEventsInput, GetPositionsInput,
    GetPricePerShareInput, GetProfitsInput, GetTotalValueLockedInput, MovementsByBlock,
    ProfitsWithRange, Protocol, ProtocolAprToken, ProtocolApyToken, ProtocolDetails,
    ProtocolPricePerShareToken, ProtocolTotalValueLockedToken, Token,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    GetProtocolDetails,
    GetProtocolTokens,
    GetPositions,
    GetDeposits,
    GetWithdrawals,
    GetClaimedRewards,
    GetTotalValueLocked,
    GetProfits,
    GetApr,
    GetApy,
    GetPricePerShare,
}

impl Capability {
    pub const ALL: [Capability; 11] = [
        Capability::GetProtocolDetails,
        Capability::GetProtocolTokens,
        Capability::GetPositions,
        Capability::GetDeposits,
        Capability::GetWithdrawals,
        Capability::GetClaimedRewards,
        Capability::GetTotalValueLocked,
        Capability::GetProfits,
        Capability::GetApr,
        Capability::GetApy,
        Capability::GetPricePerShare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::GetProtocolDetails => "getProtocolDetails",
            Capability::GetProtocolTokens => "getProtocolTokens",
            Capability::GetPositions => "getPositions",
            Capability::GetDeposits => "getDeposits",
            Capability::GetWithdrawals => "getWithdrawals",
            Capability::GetClaimedRewards => "getClaimedRewards",
            Capability::GetTotalValueLocked => "getTotalValueLocked",
            Capability::GetProfits => "getProfits",
            Capability::GetApr => "getApr",
            Capability::GetApy => "getApy",
            Capability::GetPricePerShare => "getPricePerShare",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External identity of an adapter; also the cache scope of its metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterKey {
    pub protocol: Protocol,
    pub product: String,
    pub chain: Chain,
}

impl AdapterKey {
    pub fn new(protocol: Protocol, product: impl Into<String>, chain: Chain) -> Self {
        Self {
            protocol,
            product: product.into(),
            chain,
        }
    }
}

impl fmt::Display for AdapterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.protocol, self.product, self.chain)
    }
}

/// Everything an adapter is constructed with
#[derive(Clone)]
pub struct AdapterParams {
    pub reader: Arc<dyn ContractReader>,
    pub chain: Chain,
    pub protocol: Protocol,
    pub cache: Arc<MetadataCache>,
}

#[async_trait]
pub trait ProtocolAdapter: Send + Sync {
    fn key(&self) -> &AdapterKey;

    /// Capabilities with a real implementation
    fn capabilities(&self) -> &[Capability];

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Static descriptor, no I/O
    fn get_protocol_details(&self) -> ProtocolDetails;

    async fn get_protocol_tokens(&self) -> Result<Vec<Erc20Metadata>>;

    /// Open positions of a user; empty when the user has none
    async fn get_positions(&self, input: &GetPositionsInput) -> Result<Vec<Token>>;

    /// Rebuild and overwrite cached metadata; `false` when the adapter caches none
    async fn rebuild_metadata(&self) -> Result<bool> {
        Ok(false)
    }

    async fn get_deposits(&self, _input: &GetEventsInput) -> Result<Vec<MovementsByBlock>> {
        Err(AdapterError::not_implemented(Capability::GetDeposits))
    }

    async fn get_withdrawals(&self, _input: &GetEventsInput) -> Result<Vec<MovementsByBlock>> {
        Err(AdapterError::not_implemented(Capability::GetWithdrawals))
    }

    async fn get_claimed_rewards(&self, _input: &GetEventsInput) -> Result<Vec<MovementsByBlock>> {
        Err(AdapterError::not_implemented(Capability::GetClaimedRewards))
    }

    async fn get_total_value_locked(
        &self,
        _input: &GetTotalValueLockedInput,
    ) -> Result<Vec<ProtocolTotalValueLockedToken>> {
        Err(AdapterError::not_implemented(Capability::GetTotalValueLocked))
    }

    async fn get_profits(&self, _input: &GetProfitsInput) -> Result<ProfitsWithRange> {
        Err(AdapterError::not_implemented(Capability::GetProfits))
    }

    async fn get_apr(&self, _input: &GetAprInput) -> Result<ProtocolAprToken> {
        Err(AdapterError::not_implemented(Capability::GetApr))
    }

    async fn get_apy(&self, _input: &GetApyInput) -> Result<ProtocolApyToken> {
        Err(AdapterError::not_implemented(Capability::GetApy))
    }

    async fn get_price_per_share(
        &self,
        _input: &GetPricePerShareInput,
    ) -> Result<ProtocolPricePerShareToken> {
        Err(AdapterError::not_implemented(Capability::GetPricePerShare))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names() {
        for capability in Capability::ALL {
            let json = serde_json::to_string(&capability).unwrap();
            assert_eq!(json, format!("\"{}\"", capability.as_str()));
        }
        assert_eq!(Capability::GetTotalValueLocked.to_string(), "getTotalValueLocked");
    }

    #[test]
    fn test_adapter_key_display() {
        let key = AdapterKey::new(Protocol::Stargate, "vesting", Chain::Arbitrum);
        assert_eq!(key.to_string(), "stargate/vesting/arbitrum");
    }
}
