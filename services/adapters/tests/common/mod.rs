//! Shared fixtures: a scripted `ContractReader` that counts its calls

#![allow(dead_code)]

use async_trait::async_trait;
use ethabi::Token;
use metadata_cache::MetadataCache;
use protocol_adapters::contracts::{Erc20, VotingEscrow};
use protocol_adapters::{AdapterParams, ContractReader, RpcError};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use types::{Address, Chain, Protocol, U256};

pub const ETHEREUM_VESTG: &str = "0e42acBD23FAee03249DAFF896b78d7e79fBD58E";
pub const ETHEREUM_STG: &str = "Af5191B0De278C7286d6C7CC6ab6BB8A73bA2Cd6";

pub fn address(hex: &str) -> Address {
    Address::from_str(hex.trim_start_matches("0x")).unwrap()
}

pub fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::exp10(18)
}

type CallKey = (Address, Vec<u8>);

#[derive(Default)]
pub struct MockReader {
    responses: Mutex<HashMap<CallKey, Result<Vec<u8>, String>>>,
    calls: AtomicUsize,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, to: Address, calldata: Vec<u8>, response: Result<Vec<u8>, String>) {
        self.responses.lock().unwrap().insert((to, calldata), response);
    }

    fn erc20_call(function: &str, args: &[Token]) -> Vec<u8> {
        Erc20::abi()
            .unwrap()
            .function(function)
            .unwrap()
            .encode_input(args)
            .unwrap()
    }

    fn escrow_call(function: &str, args: &[Token]) -> Vec<u8> {
        VotingEscrow::abi()
            .unwrap()
            .function(function)
            .unwrap()
            .encode_input(args)
            .unwrap()
    }

    pub fn with_erc20(self, token: Address, name: &str, symbol: &str, decimals: u8) -> Self {
        self.respond(
            token,
            Self::erc20_call("name", &[]),
            Ok(ethabi::encode(&[Token::String(name.to_string())])),
        );
        self.respond(
            token,
            Self::erc20_call("symbol", &[]),
            Ok(ethabi::encode(&[Token::String(symbol.to_string())])),
        );
        self.respond(
            token,
            Self::erc20_call("decimals", &[]),
            Ok(ethabi::encode(&[Token::Uint(U256::from(decimals))])),
        );
        self
    }

    /// Legacy token returning `bytes32` for name and symbol
    pub fn with_bytes32_erc20(
        self,
        token: Address,
        name: &str,
        symbol: &str,
        decimals: u8,
    ) -> Self {
        let bytes32 = |text: &str| {
            let mut padded = text.as_bytes().to_vec();
            padded.resize(32, 0);
            ethabi::encode(&[Token::FixedBytes(padded)])
        };
        self.respond(token, Self::erc20_call("name", &[]), Ok(bytes32(name)));
        self.respond(token, Self::erc20_call("symbol", &[]), Ok(bytes32(symbol)));
        self.respond(
            token,
            Self::erc20_call("decimals", &[]),
            Ok(ethabi::encode(&[Token::Uint(U256::from(decimals))])),
        );
        self
    }

    pub fn with_erc20_supply(self, token: Address, total_supply: U256) -> Self {
        self.respond(
            token,
            Self::erc20_call("totalSupply", &[]),
            Ok(ethabi::encode(&[Token::Uint(total_supply)])),
        );
        self
    }

    pub fn with_erc20_balance(self, token: Address, account: Address, balance: U256) -> Self {
        self.respond(
            token,
            Self::erc20_call("balanceOf", &[Token::Address(account)]),
            Ok(ethabi::encode(&[Token::Uint(balance)])),
        );
        self
    }

    pub fn with_escrow_token(self, escrow: Address, token: Address) -> Self {
        self.respond(
            escrow,
            Self::escrow_call("token", &[]),
            Ok(ethabi::encode(&[Token::Address(token)])),
        );
        self
    }

    pub fn with_lock(self, escrow: Address, user: Address, locked: U256, balance: U256) -> Self {
        self.respond(
            escrow,
            Self::escrow_call("locked", &[Token::Address(user)]),
            Ok(ethabi::encode(&[
                Token::Int(locked),
                Token::Uint(U256::from(1_800_000_000u64)),
            ])),
        );
        self.respond(
            escrow,
            Self::escrow_call("balanceOf", &[Token::Address(user)]),
            Ok(ethabi::encode(&[Token::Uint(balance)])),
        );
        self
    }

    pub fn with_reverting_balance(self, escrow: Address, user: Address) -> Self {
        self.respond(
            escrow,
            Self::escrow_call("balanceOf", &[Token::Address(user)]),
            Err("execution reverted".to_string()),
        );
        self
    }

    /// Ethereum veSTG locking STG
    pub fn stargate_ethereum() -> Self {
        Self::new()
            .with_erc20(address(ETHEREUM_VESTG), "veSTG", "veSTG", 18)
            .with_erc20(address(ETHEREUM_STG), "StargateToken", "STG", 18)
            .with_escrow_token(address(ETHEREUM_VESTG), address(ETHEREUM_STG))
    }
}

#[async_trait]
impl ContractReader for MockReader {
    async fn call(
        &self,
        to: Address,
        calldata: Vec<u8>,
        _block: Option<u64>,
    ) -> Result<Vec<u8>, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let response = self.responses.lock().unwrap().get(&(to, calldata.clone())).cloned();
        match response {
            Some(Ok(data)) => Ok(data),
            Some(Err(reason)) => Err(RpcError::Reverted { to, reason }),
            None => Err(RpcError::Reverted {
                to,
                reason: format!("no scripted response for 0x{}", hex::encode(&calldata)),
            }),
        }
    }
}

pub fn params(reader: Arc<MockReader>, chain: Chain, cache: Arc<MetadataCache>) -> AdapterParams {
    AdapterParams {
        reader,
        chain,
        protocol: Protocol::Stargate,
        cache,
    }
}
