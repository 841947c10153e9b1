//! ERC20 identity resolution

use super::{ContractReader, RpcError};
use crate::contracts::Erc20;
use std::str::FromStr;
use tracing::debug;
use types::{Address, Chain, Erc20Metadata};

/// Placeholder many protocols use for the chain's native asset
const NATIVE_SENTINEL: &str = "eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

pub fn is_native_token(address: &Address) -> bool {
    address.is_zero()
        || Address::from_str(NATIVE_SENTINEL)
            .map(|sentinel| sentinel == *address)
            .unwrap_or(false)
}

/// Name, symbol and decimals of `address` on `chain`, read concurrently.
///
/// Native-asset placeholders resolve to the chain's gas token without I/O.
pub async fn resolve_token_metadata(
    reader: &dyn ContractReader,
    chain: Chain,
    address: Address,
) -> Result<Erc20Metadata, RpcError> {
    if is_native_token(&address) {
        return Ok(Erc20Metadata {
            address,
            ..chain.native_token()
        });
    }

    let token = Erc20::new(reader, address);
    let (name, symbol, decimals) =
        tokio::try_join!(token.name(None), token.symbol(None), token.decimals(None))?;

    debug!("Resolved {} ({} decimals) at {:?} on {}", symbol, decimals, address, chain);

    Ok(Erc20Metadata {
        address,
        name,
        symbol,
        decimals,
    })
}
