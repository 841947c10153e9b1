//! Base-unit rendering for token balances
//!
//! On-chain balances are integers in the token's smallest unit. Positions carry
//! both the raw integer and its decimal rendering, so the two conversions here
//! must be exact inverses of each other.
//!
//! ## Rendering Rules
//!
//! - Integer part, a `.`, then the fractional digits with trailing zeros trimmed
//! - At least one fractional digit is always present (`500.0`, `0.0`)
//! - No precision loss: every `U256` renders and parses back to itself
//!
//! ```rust
//! use types::units::{format_units, parse_units};
//! use web3::types::U256;
//!
//! let raw = U256::from(1_500_000u64);
//! assert_eq!(format_units(raw, 6), "1.5");
//! assert_eq!(parse_units("1.5", 6).unwrap(), raw);
//! ```

use thiserror::Error;
use web3::types::U256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("Empty amount")]
    Empty,

    #[error("Invalid digit in amount: {0}")]
    InvalidDigit(String),

    #[error("Too many fractional digits: {found} > {decimals}")]
    TooManyDecimals { found: usize, decimals: u8 },

    #[error("Amount overflows 256 bits: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, UnitsError>;

/// Render a base-unit integer as a decimal string with `decimals` places.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let places = decimals as usize;

    // Left-pad so there is always at least one integer digit
    let padded = if digits.len() <= places {
        format!("{}{}", "0".repeat(places + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (integer, fraction) = padded.split_at(padded.len() - places);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{}.0", integer)
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// Parse a decimal string back into base units.
///
/// Accepts `"500"`, `"500.0"` and `"0.000001"`. Rejects signs, exponents and
/// any significant fractional digit beyond `decimals`; trailing zeros are
/// insignificant, so `"7.0"` parses at 0 decimals.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (integer, fraction) = match amount.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (amount, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err(UnitsError::Empty);
    }

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(integer) || !all_digits(fraction) {
        return Err(UnitsError::InvalidDigit(amount.to_string()));
    }

    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals {
            found: fraction.len(),
            decimals,
        });
    }

    let scaled = format!(
        "{}{}{}",
        integer,
        fraction,
        "0".repeat(decimals as usize - fraction.len())
    );
    let scaled = scaled.trim_start_matches('0');
    if scaled.is_empty() {
        return Ok(U256::zero());
    }

    U256::from_dec_str(scaled).map_err(|_| UnitsError::Overflow(amount.to_string()))
}

/// Serde helper rendering `U256` as a base-10 string.
///
/// `web3` serializes `U256` as 0x-hex by default; positions are consumed by
/// portfolio tooling that expects decimal integers. Hex input is still accepted
/// when reading.
pub mod serde_u256_dec {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use web3::types::U256;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.strip_prefix("0x") {
            Some(hex) => U256::from_str_radix(hex, 16).map_err(de::Error::custom),
            None => U256::from_dec_str(&raw).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wei(s: &str) -> U256 {
        U256::from_dec_str(s).unwrap()
    }

    #[test]
    fn test_format_whole_amounts() {
        assert_eq!(format_units(wei("500000000000000000000"), 18), "500.0");
        assert_eq!(format_units(U256::from(7u64), 0), "7.0");
        assert_eq!(format_units(U256::zero(), 18), "0.0");
        assert_eq!(format_units(U256::zero(), 0), "0.0");
    }

    #[test]
    fn test_format_fractional_amounts() {
        assert_eq!(format_units(wei("500000000000000000"), 18), "0.5");
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
        assert_eq!(format_units(U256::from(1_234_500u64), 6), "1.2345");
        assert_eq!(format_units(U256::MAX, 18).len(), 79);
    }

    #[test]
    fn test_parse_accepts_short_forms() {
        assert_eq!(parse_units("500", 18).unwrap(), wei("500000000000000000000"));
        assert_eq!(parse_units(".5", 1).unwrap(), U256::from(5u64));
        assert_eq!(parse_units("0.0", 6).unwrap(), U256::zero());
        assert_eq!(parse_units("000.100", 3).unwrap(), U256::from(100u64));
    }

    #[test]
    fn test_zero_decimal_tokens_round_trip() {
        assert_eq!(format_units(U256::from(7u64), 0), "7.0");
        assert_eq!(parse_units("7.0", 0).unwrap(), U256::from(7u64));
        assert_eq!(parse_units("7", 0).unwrap(), U256::from(7u64));
        assert_eq!(parse_units("7.000", 0).unwrap(), U256::from(7u64));
        assert_eq!(parse_units("0.0", 0).unwrap(), U256::zero());
        assert_eq!(
            parse_units("7.5", 0),
            Err(UnitsError::TooManyDecimals { found: 1, decimals: 0 })
        );
        assert_eq!(parse_units("1.50", 1).unwrap(), U256::from(15u64));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_units("", 18), Err(UnitsError::Empty));
        assert_eq!(parse_units(".", 18), Err(UnitsError::Empty));
        assert!(matches!(parse_units("-1", 18), Err(UnitsError::InvalidDigit(_))));
        assert!(matches!(parse_units("1e18", 18), Err(UnitsError::InvalidDigit(_))));
        assert_eq!(
            parse_units("0.1234567", 6),
            Err(UnitsError::TooManyDecimals { found: 7, decimals: 6 })
        );
        assert!(matches!(
            parse_units(&"9".repeat(80), 0),
            Err(UnitsError::Overflow(_))
        ));
    }

    #[test]
    fn test_serde_decimal_string() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper(#[serde(with = "serde_u256_dec")] U256);

        let json = serde_json::to_string(&Wrapper(wei("500000000000000000000"))).unwrap();
        assert_eq!(json, "\"500000000000000000000\"");

        let from_hex: Wrapper = serde_json::from_str("\"0xff\"").unwrap();
        assert_eq!(from_hex.0, U256::from(255u64));
    }

    proptest! {
        #[test]
        fn prop_render_then_parse_is_identity(
            high in any::<u128>(),
            low in any::<u128>(),
            decimals in 0u8..=40,
        ) {
            let raw = (U256::from(high) << 128) | U256::from(low);
            let rendered = format_units(raw, decimals);
            prop_assert_eq!(parse_units(&rendered, decimals).unwrap(), raw);
        }
    }
}
