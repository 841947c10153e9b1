//! Inputs and outputs of the adapter capabilities
//!
//! Every protocol adapter speaks these shapes regardless of how the protocol
//! stores its state on-chain.

use crate::chain::Chain;
use crate::protocol::Protocol;
use crate::token::{Erc20Metadata, Token, TokenType};
use crate::units::serde_u256_dec;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use web3::types::{Address, U256};

/// How a protocol's positions should be read by a portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionType {
    #[serde(rename = "supply")]
    Supply,
    #[serde(rename = "lend")]
    Lend,
    #[serde(rename = "borrow")]
    Borrow,
    #[serde(rename = "stake")]
    Staked,
    #[serde(rename = "reward")]
    Reward,
    #[serde(rename = "fiat-prices")]
    FiatPrices,
}

/// Static descriptor of one (protocol, product, chain) adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolDetails {
    pub protocol_id: Protocol,
    pub product_id: String,
    pub chain_id: Chain,
    pub name: String,
    pub description: String,
    pub site_url: String,
    pub icon_url: String,
    pub position_type: PositionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPositionsInput {
    pub user_address: Address,
    /// Historical block to read at; latest when absent
    #[serde(default)]
    pub block_number: Option<u64>,
}

/// Block-range filter shared by deposits, withdrawals and claimed rewards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetEventsInput {
    pub user_address: Address,
    pub protocol_token_address: Address,
    pub from_block: u64,
    pub to_block: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTotalValueLockedInput {
    /// Restrict to these protocol tokens; all when absent
    #[serde(default)]
    pub protocol_token_addresses: Option<Vec<Address>>,
    #[serde(default)]
    pub block_number: Option<u64>,
}

/// Lookback window for profit calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimePeriod {
    OneDay,
    SevenDays,
    ThirtyDays,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfitsInput {
    pub user_address: Address,
    pub time_period: TimePeriod,
    #[serde(default)]
    pub to_block: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAprInput {
    pub protocol_token_address: Address,
    #[serde(default)]
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetApyInput {
    pub protocol_token_address: Address,
    #[serde(default)]
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPricePerShareInput {
    pub protocol_token_address: Address,
    #[serde(default)]
    pub block_number: Option<u64>,
}

/// Total supply of a protocol token and what backs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolTotalValueLockedToken {
    #[serde(flatten)]
    pub metadata: Erc20Metadata,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(with = "serde_u256_dec")]
    pub total_supply_raw: U256,
    pub total_supply: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionProfits {
    #[serde(flatten)]
    pub metadata: Erc20Metadata,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    /// Profit in token units; negative on a loss
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitsWithRange {
    pub from_block: u64,
    pub to_block: u64,
    pub tokens: Vec<PositionProfits>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolAprToken {
    #[serde(flatten)]
    pub metadata: Erc20Metadata,
    pub apr_decimal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolApyToken {
    #[serde(flatten)]
    pub metadata: Erc20Metadata,
    pub apy_decimal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingPricePerShare {
    #[serde(flatten)]
    pub metadata: Erc20Metadata,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    #[serde(with = "serde_u256_dec")]
    pub price_per_share_raw: U256,
    pub price_per_share: String,
}

/// Exchange rate of one protocol share into its underlying tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolPricePerShareToken {
    #[serde(flatten)]
    pub metadata: Erc20Metadata,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub tokens: Vec<UnderlyingPricePerShare>,
}
