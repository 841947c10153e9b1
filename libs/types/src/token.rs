//! Token identity and position trees
//!
//! A position is a small tree: the protocol token the user holds at the top,
//! and the underlying tokens it decomposes into one level down. Each node
//! carries the raw base-unit balance and its decimal rendering, and the two
//! can never disagree because [`TokenBalance`] only exists through
//! [`TokenBalance::new`] (or a validated deserialization).

use crate::units::{format_units, parse_units, serde_u256_dec};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use web3::types::{Address, U256};

/// ERC20 identity data; immutable once resolved for the tokens this system targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Metadata {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Role of a token inside a position tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenType {
    Protocol,
    Underlying,
    ClaimableReward,
    Fiat,
}

/// A token balance with both representations kept in lockstep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TokenBalanceDocument")]
pub struct TokenBalance {
    #[serde(flatten)]
    metadata: Erc20Metadata,

    #[serde(rename = "type")]
    token_type: TokenType,

    #[serde(with = "serde_u256_dec")]
    balance_raw: U256,

    balance: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
}

impl TokenBalance {
    pub fn new(metadata: Erc20Metadata, token_type: TokenType, balance_raw: U256) -> Self {
        let balance = format_units(balance_raw, metadata.decimals);
        Self {
            metadata,
            token_type,
            balance_raw,
            balance,
            icon_url: None,
        }
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn metadata(&self) -> &Erc20Metadata {
        &self.metadata
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn balance_raw(&self) -> U256 {
        self.balance_raw
    }

    /// Decimal rendering of [`Self::balance_raw`] at the token's decimals
    pub fn balance(&self) -> &str {
        &self.balance
    }

    pub fn icon_url(&self) -> Option<&str> {
        self.icon_url.as_deref()
    }

    pub fn is_zero(&self) -> bool {
        self.balance_raw.is_zero()
    }
}

/// Wire shape accepted when reading balances back
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenBalanceDocument {
    #[serde(flatten)]
    metadata: Erc20Metadata,
    #[serde(rename = "type")]
    token_type: TokenType,
    #[serde(with = "serde_u256_dec")]
    balance_raw: U256,
    balance: String,
    #[serde(default)]
    icon_url: Option<String>,
}

impl TryFrom<TokenBalanceDocument> for TokenBalance {
    type Error = String;

    fn try_from(doc: TokenBalanceDocument) -> Result<Self, Self::Error> {
        let parsed = parse_units(&doc.balance, doc.metadata.decimals)
            .map_err(|e| format!("invalid balance {:?}: {}", doc.balance, e))?;
        if parsed != doc.balance_raw {
            return Err(format!(
                "balance {} does not match balanceRaw {} at {} decimals",
                doc.balance, doc.balance_raw, doc.metadata.decimals
            ));
        }

        let balance = TokenBalance::new(doc.metadata, doc.token_type, doc.balance_raw);
        Ok(match doc.icon_url {
            Some(url) => balance.with_icon_url(url),
            None => balance,
        })
    }
}

/// Node of a position tree.
///
/// Serialized flat: the balance fields at the top level, plus a `tokens`
/// array on composites only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    // Composite must be tried first when reading: a leaf would otherwise
    // swallow documents that carry `tokens`.
    Composite {
        #[serde(flatten)]
        balance: TokenBalance,
        tokens: Vec<Token>,
    },
    Leaf(TokenBalance),
}

impl Token {
    pub fn leaf(balance: TokenBalance) -> Self {
        Token::Leaf(balance)
    }

    pub fn composite(balance: TokenBalance, tokens: Vec<Token>) -> Self {
        Token::Composite { balance, tokens }
    }

    pub fn balance(&self) -> &TokenBalance {
        match self {
            Token::Leaf(balance) | Token::Composite { balance, .. } => balance,
        }
    }

    pub fn children(&self) -> &[Token] {
        match self {
            Token::Leaf(_) => &[],
            Token::Composite { tokens, .. } => tokens,
        }
    }

    /// Number of levels in this subtree (a leaf is 1)
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Token::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(byte: u8, symbol: &str, decimals: u8) -> Erc20Metadata {
        Erc20Metadata {
            address: Address::repeat_byte(byte),
            name: format!("{} Token", symbol),
            symbol: symbol.to_string(),
            decimals,
        }
    }

    fn sample_position() -> Token {
        let locked = U256::from_dec_str("500000000000000000000").unwrap();
        Token::composite(
            TokenBalance::new(metadata(0x0e, "veSTG", 18), TokenType::Protocol, locked),
            vec![Token::leaf(
                TokenBalance::new(metadata(0xaf, "STG", 18), TokenType::Underlying, locked)
                    .with_icon_url("https://icons.example/stg.png"),
            )],
        )
    }

    #[test]
    fn test_balance_is_rendered_from_raw() {
        let balance = TokenBalance::new(
            metadata(1, "USDC", 6),
            TokenType::Underlying,
            U256::from(1_500_000u64),
        );
        assert_eq!(balance.balance(), "1.5");
        assert!(!balance.is_zero());
    }

    #[test]
    fn test_tree_shape() {
        let position = sample_position();
        assert_eq!(position.depth(), 2);
        assert_eq!(position.children().len(), 1);
        assert_eq!(position.balance().token_type(), TokenType::Protocol);
        assert_eq!(position.children()[0].depth(), 1);

        let empty = Token::composite(position.balance().clone(), vec![]);
        assert_eq!(empty.depth(), 1);
    }

    #[test]
    fn test_serialized_shape_is_flat() {
        let value = serde_json::to_value(sample_position()).unwrap();

        assert_eq!(value["symbol"], "veSTG");
        assert_eq!(value["type"], "protocol");
        assert_eq!(value["balanceRaw"], "500000000000000000000");
        assert_eq!(value["balance"], "500.0");
        assert!(value.get("iconUrl").is_none());

        let underlying = &value["tokens"][0];
        assert_eq!(underlying["type"], "underlying");
        assert_eq!(underlying["balance"], "500.0");
        assert_eq!(underlying["iconUrl"], "https://icons.example/stg.png");
        assert!(underlying.get("tokens").is_none());
    }

    #[test]
    fn test_reading_back_restores_variants() {
        let position = sample_position();
        let json = serde_json::to_string(&position).unwrap();
        let restored: Token = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, position);
        assert!(matches!(restored, Token::Composite { .. }));
        assert!(matches!(restored.children()[0], Token::Leaf(_)));
    }

    #[test]
    fn test_zero_decimal_balance_reads_back() {
        let balance = TokenBalance::new(
            metadata(0x07, "NFTX", 0),
            TokenType::Protocol,
            U256::from(7u64),
        );
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["balanceRaw"], "7");
        assert_eq!(json["balance"], "7.0");

        let restored: TokenBalance = serde_json::from_value(json).unwrap();
        assert_eq!(restored, balance);
    }

    #[test]
    fn test_inconsistent_balance_is_rejected() {
        let doc = json!({
            "address": "0x0101010101010101010101010101010101010101",
            "name": "USD Coin",
            "symbol": "USDC",
            "decimals": 6,
            "type": "underlying",
            "balanceRaw": "1500000",
            "balance": "15.0"
        });

        let err = serde_json::from_value::<TokenBalance>(doc).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }
}
