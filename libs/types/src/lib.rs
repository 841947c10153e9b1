//! # Position Data Model
//!
//! Shared value types returned by every protocol adapter: token identity,
//! position trees with raw and rendered balances, movements, and the
//! capability inputs/outputs.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: balances stay `U256` base units; the decimal string
//!   is always derived from them (see [`units`])
//! - **Absence over Zero**: an empty position list means "no position"; adapters
//!   never emit zero-valued trees
//! - **Stable Wire Shape**: camelCase JSON consumed by downstream portfolio tooling
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Erc20Metadata, Token, TokenBalance, TokenType};
//! use web3::types::{Address, U256};
//!
//! let stg = Erc20Metadata {
//!     address: Address::repeat_byte(0xaf),
//!     name: "StargateToken".to_string(),
//!     symbol: "STG".to_string(),
//!     decimals: 18,
//! };
//! let leaf = Token::leaf(TokenBalance::new(stg, TokenType::Underlying, U256::exp10(18)));
//! assert_eq!(leaf.balance().balance(), "1.0");
//! ```

pub mod adapter;
pub mod chain;
pub mod movement;
pub mod protocol;
pub mod token;
pub mod units;

pub use adapter::{
    GetAprInput, GetApyInput, GetEventsInput, GetPositionsInput, GetPricePerShareInput,
    GetProfitsInput, GetTotalValueLockedInput, PositionProfits, PositionType, ProfitsWithRange,
    ProtocolAprToken, ProtocolApyToken, ProtocolDetails, ProtocolPricePerShareToken,
    ProtocolTotalValueLockedToken, TimePeriod, UnderlyingPricePerShare,
};
pub use chain::Chain;
pub use movement::MovementsByBlock;
pub use protocol::Protocol;
pub use token::{Erc20Metadata, Token, TokenBalance, TokenType};
pub use units::{format_units, parse_units, UnitsError};

// Chain primitives used across the public API
pub use web3::types::{Address, H256, U256};
