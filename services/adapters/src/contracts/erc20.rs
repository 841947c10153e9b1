use super::{call_function, decode_error, load_abi, single_uint};
use crate::rpc::{ContractReader, RpcError};
use ethabi::{Contract, ParamType, Token};
use once_cell::sync::OnceCell;
use types::{Address, U256};

const ERC20_ABI: &str = r#"[
    {"type":"function","name":"name","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
    {"type":"function","name":"symbol","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
    {"type":"function","name":"decimals","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint8"}]},
    {"type":"function","name":"totalSupply","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint256"}]},
    {"type":"function","name":"balanceOf","stateMutability":"view","inputs":[{"name":"account","type":"address"}],"outputs":[{"name":"","type":"uint256"}]}
]"#;

static ABI: OnceCell<Contract> = OnceCell::new();

pub struct Erc20<'a> {
    reader: &'a dyn ContractReader,
    address: Address,
}

impl<'a> Erc20<'a> {
    pub fn new(reader: &'a dyn ContractReader, address: Address) -> Self {
        Self { reader, address }
    }

    pub fn abi() -> Result<&'static Contract, RpcError> {
        load_abi(&ABI, ERC20_ABI)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn name(&self, block: Option<u64>) -> Result<String, RpcError> {
        self.text("name", block).await
    }

    pub async fn symbol(&self, block: Option<u64>) -> Result<String, RpcError> {
        self.text("symbol", block).await
    }

    pub async fn decimals(&self, block: Option<u64>) -> Result<u8, RpcError> {
        let function = Self::abi()?.function("decimals")?;
        let value = single_uint(
            call_function(self.reader, self.address, function, &[], block).await?,
            self.address,
            "decimals",
        )?;
        if value > U256::from(u8::MAX) {
            return Err(decode_error(self.address, "decimals", format!("{} out of range", value)));
        }
        Ok(value.low_u32() as u8)
    }

    pub async fn total_supply(&self, block: Option<u64>) -> Result<U256, RpcError> {
        let function = Self::abi()?.function("totalSupply")?;
        let tokens = call_function(self.reader, self.address, function, &[], block).await?;
        single_uint(tokens, self.address, "totalSupply")
    }

    pub async fn balance_of(&self, account: Address, block: Option<u64>) -> Result<U256, RpcError> {
        let function = Self::abi()?.function("balanceOf")?;
        let tokens = call_function(
            self.reader,
            self.address,
            function,
            &[Token::Address(account)],
            block,
        )
        .await?;
        single_uint(tokens, self.address, "balanceOf")
    }

    /// `string` return, falling back to `bytes32` for legacy tokens such as MKR
    async fn text(&self, what: &str, block: Option<u64>) -> Result<String, RpcError> {
        let function = Self::abi()?.function(what)?;
        let calldata = function.encode_input(&[])?;
        let raw = self.reader.call(self.address, calldata, block).await?;

        if let Ok(mut tokens) = function.decode_output(&raw) {
            if let Some(Token::String(text)) = tokens.pop() {
                return Ok(text);
            }
        }

        match ethabi::decode(&[ParamType::FixedBytes(32)], &raw) {
            Ok(mut tokens) => match tokens.pop() {
                Some(Token::FixedBytes(bytes)) => {
                    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
                    Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
                }
                other => Err(decode_error(self.address, what, format!("unexpected {:?}", other))),
            },
            Err(e) => Err(decode_error(self.address, what, e)),
        }
    }
}
