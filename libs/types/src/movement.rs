//! Deposit, withdrawal and reward movements
//!
//! Built per query from event logs; never persisted by the adapters.

use crate::token::{Erc20Metadata, Token};
use serde::{Deserialize, Serialize};
use web3::types::H256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementsByBlock {
    /// Protocol token the movement happened on
    pub protocol_token: Erc20Metadata,

    /// Amounts moved, one entry per token involved
    pub tokens: Vec<Token>,

    pub block_number: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<H256>,
}
