//! Protocol identifiers
//!
//! The kebab-case id is the external name of a protocol: it appears in the
//! adapter registry key, in configuration sections and in cache paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! protocols {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Protocol {
            $(#[serde(rename = $id)] $variant,)+
        }

        impl Protocol {
            pub const ALL: &'static [Protocol] = &[$(Protocol::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Protocol::$variant => $id,)+
                }
            }
        }
    };
}

protocols! {
    Stargate => "stargate",
    AaveV2 => "aave-v2",
    AaveV3 => "aave-v3",
    UniswapV3 => "uniswap-v3",
    Lido => "lido",
    Curve => "curve",
    Compound => "compound",
    Maker => "maker",
    Gmx => "gmx",
    Swell => "swell",
    MorphoAaveV2 => "morpho-aave-v2",
    Convex => "convex",
    MorphoCompoundV2 => "morpho-compound-v2",
    MorphoAaveV3EthOptimizer => "morpho-aave-v3-eth",
    SyncSwap => "syncswap",
    IZiSwap => "iziswap",
    ChimpExchange => "chimp-exchange",
    MendiFinance => "mendi-finance",
    CarbonDeFi => "carbon-defi",
    RocketPool => "rocket-pool",
    PricesV2 => "prices-v2",
    UniswapV2 => "uniswap-v2",
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|protocol| protocol.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown protocol: {}", s))
    }
}
