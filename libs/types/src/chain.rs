//! Supported EVM chains
//!
//! Chains are identified by their lowercase name everywhere: config files,
//! cache paths, CLI flags and serialized JSON. The numeric EIP-155 id is
//! accepted when parsing.

use crate::token::Erc20Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use web3::types::Address;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Optimism,
    Bsc,
    Polygon,
    Fantom,
    Base,
    Arbitrum,
    Avalanche,
    Linea,
}

impl Chain {
    pub const ALL: [Chain; 9] = [
        Chain::Ethereum,
        Chain::Optimism,
        Chain::Bsc,
        Chain::Polygon,
        Chain::Fantom,
        Chain::Base,
        Chain::Arbitrum,
        Chain::Avalanche,
        Chain::Linea,
    ];

    /// EIP-155 chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Optimism => 10,
            Chain::Bsc => 56,
            Chain::Polygon => 137,
            Chain::Fantom => 250,
            Chain::Base => 8453,
            Chain::Arbitrum => 42161,
            Chain::Avalanche => 43114,
            Chain::Linea => 59144,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.chain_id() == chain_id)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Optimism => "optimism",
            Chain::Bsc => "bsc",
            Chain::Polygon => "polygon",
            Chain::Fantom => "fantom",
            Chain::Base => "base",
            Chain::Arbitrum => "arbitrum",
            Chain::Avalanche => "avalanche",
            Chain::Linea => "linea",
        }
    }

    /// Metadata of the chain's gas token, used when a position is denominated
    /// in the native asset rather than an ERC20.
    pub fn native_token(&self) -> Erc20Metadata {
        let (name, symbol) = match self {
            Chain::Bsc => ("BNB", "BNB"),
            Chain::Polygon => ("Polygon Ecosystem Token", "POL"),
            Chain::Fantom => ("Fantom", "FTM"),
            Chain::Avalanche => ("Avalanche", "AVAX"),
            _ => ("Ether", "ETH"),
        };

        Erc20Metadata {
            address: Address::zero(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = String;

    /// Accepts the lowercase name or the numeric chain id
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Ok(chain_id) = s.parse::<u64>() {
            return Self::from_chain_id(chain_id)
                .ok_or_else(|| format!("Unsupported chain id: {}", chain_id));
        }

        Self::ALL
            .into_iter()
            .find(|chain| chain.as_str() == s)
            .ok_or_else(|| format!("Unknown chain: {}", s))
    }
}
