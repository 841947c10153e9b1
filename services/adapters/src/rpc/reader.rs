//! `web3` backed reader

use super::{ContractReader, RpcError};
use adapters_config::defaults;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use types::Address;
use web3::transports::Http;
use web3::types::{BlockId, BlockNumber, Bytes, CallRequest};
use web3::Web3;

pub struct Web3Reader {
    web3: Web3<Http>,
    endpoint: String,
}

impl Web3Reader {
    /// HTTP/1.1 keep-alive with pooled connections; `timeout` bounds each call
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, RpcError> {
        let invalid = |reason: String| RpcError::InvalidEndpoint {
            url: rpc_url.to_string(),
            reason,
        };

        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(defaults::rpc::POOL_MAX_IDLE_PER_HOST)
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(defaults::rpc::TCP_KEEPALIVE_SECS))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| invalid(format!("failed to create HTTP client: {}", e)))?;

        let url = rpc_url
            .parse::<reqwest::Url>()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            web3: Web3::new(Http::with_client(client, url)),
            endpoint: rpc_url.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContractReader for Web3Reader {
    async fn call(
        &self,
        to: Address,
        calldata: Vec<u8>,
        block: Option<u64>,
    ) -> Result<Vec<u8>, RpcError> {
        let request = CallRequest {
            to: Some(to),
            data: Some(Bytes(calldata)),
            ..Default::default()
        };
        let block = block.map(|number| BlockId::Number(BlockNumber::Number(number.into())));

        debug!("eth_call to {:?} at {:?}", to, block);

        match self.web3.eth().call(request, block).await {
            Ok(bytes) => Ok(bytes.0),
            Err(web3::Error::Rpc(e)) => Err(RpcError::Reverted {
                to,
                reason: e.message,
            }),
            Err(e) => Err(RpcError::Transport(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_endpoint() {
        let result = Web3Reader::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(RpcError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_accepts_http_endpoint() {
        let reader = Web3Reader::new("http://127.0.0.1:8545", Duration::from_secs(1)).unwrap();
        assert_eq!(reader.endpoint(), "http://127.0.0.1:8545");
    }
}
