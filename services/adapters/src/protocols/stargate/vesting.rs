//! Stargate veSTG vesting positions
//!
//! A position is STG locked in the voting escrow. It is reported as the veSTG
//! balance (decaying voting power) with the locked STG nested underneath.

use crate::adapter::{AdapterKey, AdapterParams, Capability, ProtocolAdapter};
use crate::contracts::VotingEscrow;
use crate::error::{AdapterError, Result};
use crate::rpc::icon::build_trust_asset_icon_url;
use crate::rpc::token_metadata::resolve_token_metadata;
use crate::rpc::ContractReader;
use adapters_config::AdaptersConfig;
use async_trait::async_trait;
use metadata_cache::{CacheKey, Memoized, MetadataBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};
use types::{
    Address, Chain, Erc20Metadata, GetPositionsInput, PositionType, ProtocolDetails, Token,
    TokenBalance, TokenType,
};

pub const PRODUCT: &str = "vesting";

const METADATA_SCOPE: &str = "vesting-token";

const CAPABILITIES: &[Capability] = &[
    Capability::GetProtocolDetails,
    Capability::GetProtocolTokens,
    Capability::GetPositions,
];

/// veSTG deployments
pub fn default_contract_addresses() -> BTreeMap<Chain, Address> {
    [
        (Chain::Ethereum, "0e42acBD23FAee03249DAFF896b78d7e79fBD58E"),
        (Chain::Arbitrum, "fBd849E6007f9BC3CC2D6Eb159c045B8dc660268"),
    ]
    .into_iter()
    .filter_map(|(chain, hex)| Address::from_str(hex).ok().map(|address| (chain, address)))
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingTokenMetadata {
    #[serde(flatten)]
    pub token: Erc20Metadata,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StargateVestingMetadata {
    pub contract_token: Erc20Metadata,
    pub underlying_token: UnderlyingTokenMetadata,
}

/// Resolves the escrow token and the STG it locks
pub struct VestingMetadataBuilder {
    reader: Arc<dyn ContractReader>,
    chain: Chain,
    contract: Address,
}

#[async_trait]
impl MetadataBuilder for VestingMetadataBuilder {
    type Metadata = StargateVestingMetadata;
    type Error = AdapterError;

    async fn build_metadata(&self) -> Result<StargateVestingMetadata> {
        let reader = self.reader.as_ref();
        let underlying_address = VotingEscrow::new(reader, self.contract).token(None).await?;

        let (contract_token, underlying_token) = tokio::try_join!(
            resolve_token_metadata(reader, self.chain, self.contract),
            resolve_token_metadata(reader, self.chain, underlying_address)
        )?;

        let icon_url = build_trust_asset_icon_url(self.chain, &underlying_token.address);

        Ok(StargateVestingMetadata {
            contract_token,
            underlying_token: UnderlyingTokenMetadata {
                token: underlying_token,
                icon_url,
            },
        })
    }
}

pub struct StargateVestingAdapter {
    key: AdapterKey,
    reader: Arc<dyn ContractReader>,
    metadata: Memoized<VestingMetadataBuilder>,
}

impl StargateVestingAdapter {
    /// Fails when `contracts` has no deployment for the adapter's chain
    pub fn new(params: AdapterParams, contracts: &BTreeMap<Chain, Address>) -> Result<Self> {
        let key = AdapterKey::new(params.protocol, PRODUCT, params.chain);

        let contract = contracts.get(&params.chain).copied().ok_or_else(|| {
            AdapterError::DataInconsistency(format!(
                "no veSTG contract configured for {}",
                params.chain
            ))
        })?;

        let cache_key = CacheKey::new(
            params.protocol.as_str(),
            PRODUCT,
            params.chain.as_str(),
            METADATA_SCOPE,
        )
        .map_err(|e| AdapterError::DataInconsistency(e.to_string()))?;

        let builder = VestingMetadataBuilder {
            reader: params.reader.clone(),
            chain: params.chain,
            contract,
        };

        debug!("Created {} adapter for contract {:?}", key, contract);

        Ok(Self {
            key,
            reader: params.reader,
            metadata: Memoized::new(params.cache, cache_key, builder),
        })
    }

    /// Built-in deployments with configuration overrides applied
    pub fn from_config(params: AdapterParams, config: &AdaptersConfig) -> Result<Self> {
        let mut contracts = default_contract_addresses();
        if let Some(address) = config.contract_override(params.protocol, PRODUCT, params.chain) {
            info!("Using configured veSTG contract {:?} on {}", address, params.chain);
            contracts.insert(params.chain, address);
        }
        Self::new(params, &contracts)
    }

    pub fn supported_chains() -> Vec<Chain> {
        default_contract_addresses().into_keys().collect()
    }

    pub fn contract_address(&self) -> Address {
        self.metadata.builder().contract
    }
}

#[async_trait]
impl ProtocolAdapter for StargateVestingAdapter {
    fn key(&self) -> &AdapterKey {
        &self.key
    }

    fn capabilities(&self) -> &[Capability] {
        CAPABILITIES
    }

    fn get_protocol_details(&self) -> ProtocolDetails {
        ProtocolDetails {
            protocol_id: self.key.protocol,
            product_id: self.key.product.clone(),
            chain_id: self.key.chain,
            name: "Stargate".to_string(),
            description: "Stargate is a fully composable liquidity transport protocol that lives at the heart of Omnichain DeFi".to_string(),
            site_url: "https://stargate.finance/".to_string(),
            icon_url: "https://stargate.finance/favicons/favicon-light.svg".to_string(),
            position_type: PositionType::Staked,
        }
    }

    async fn get_protocol_tokens(&self) -> Result<Vec<Erc20Metadata>> {
        Ok(vec![self.metadata.get().await?.contract_token])
    }

    async fn get_positions(&self, input: &GetPositionsInput) -> Result<Vec<Token>> {
        let StargateVestingMetadata {
            contract_token,
            underlying_token,
        } = self.metadata.get().await?;

        let escrow = VotingEscrow::new(self.reader.as_ref(), contract_token.address);
        let (locked, balance) = tokio::try_join!(
            escrow.locked(input.user_address, input.block_number),
            escrow.balance_of(input.user_address, input.block_number)
        )?;

        if locked.amount.is_zero() && balance.is_zero() {
            return Ok(Vec::new());
        }

        let underlying =
            TokenBalance::new(underlying_token.token, TokenType::Underlying, locked.amount)
                .with_icon_url(underlying_token.icon_url);
        let protocol_token = TokenBalance::new(contract_token, TokenType::Protocol, balance);

        Ok(vec![Token::composite(protocol_token, vec![Token::leaf(underlying)])])
    }

    async fn rebuild_metadata(&self) -> Result<bool> {
        self.metadata.rebuild().await?;
        Ok(true)
    }
}
