//! Typed read-only contract bindings
//!
//! ABIs are embedded as JSON and parsed once on first use. Every read takes an
//! optional block number so positions can be queried historically.

mod erc20;
mod voting_escrow;

pub use erc20::Erc20;
pub use voting_escrow::{LockedBalance, VotingEscrow};

use crate::rpc::{ContractReader, RpcError};
use ethabi::{Contract, Function, Token};
use once_cell::sync::OnceCell;
use types::{Address, U256};

pub(crate) fn load_abi(
    cell: &'static OnceCell<Contract>,
    json: &str,
) -> Result<&'static Contract, RpcError> {
    cell.get_or_try_init(|| Contract::load(json.as_bytes()))
        .map_err(RpcError::from)
}

/// Encode, call and decode one function
pub(crate) async fn call_function(
    reader: &dyn ContractReader,
    to: Address,
    function: &Function,
    args: &[Token],
    block: Option<u64>,
) -> Result<Vec<Token>, RpcError> {
    let calldata = function.encode_input(args)?;
    let raw = reader.call(to, calldata, block).await?;
    function
        .decode_output(&raw)
        .map_err(|e| decode_error(to, &function.name, e))
}

pub(crate) fn decode_error(to: Address, what: &str, reason: impl ToString) -> RpcError {
    RpcError::Decode {
        to,
        what: what.to_string(),
        reason: reason.to_string(),
    }
}

fn first(tokens: Vec<Token>, to: Address, what: &str) -> Result<Token, RpcError> {
    tokens
        .into_iter()
        .next()
        .ok_or_else(|| decode_error(to, what, "empty return data"))
}

pub(crate) fn single_uint(tokens: Vec<Token>, to: Address, what: &str) -> Result<U256, RpcError> {
    match first(tokens, to, what)? {
        Token::Uint(value) => Ok(value),
        other => Err(decode_error(to, what, format!("expected uint, got {:?}", other))),
    }
}

pub(crate) fn single_address(
    tokens: Vec<Token>,
    to: Address,
    what: &str,
) -> Result<Address, RpcError> {
    match first(tokens, to, what)? {
        Token::Address(value) => Ok(value),
        other => Err(decode_error(to, what, format!("expected address, got {:?}", other))),
    }
}
