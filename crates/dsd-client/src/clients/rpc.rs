use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tiny_keccak::Hasher;
use url::Url;

use crate::{clients::http_client, error::ClientError, traits::EpochSource};

const EPOCH_SIGNATURE: &str = "epoch()";

/// Read-only Ethereum JSON-RPC client of the DSD DAO.
///
/// The RPC urls are sorted by priority: each call goes to the first one and
/// falls through to the next on failure.
pub struct EthRpcClient {
    http_client: Client,
    rpc_urls: Vec<Url>,
    dao_address: String,
}

#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl EthRpcClient {
    pub fn new(
        rpc_urls: Vec<Url>,
        dao_address: &str,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        if rpc_urls.is_empty() {
            return Err(ClientError::NoRpcEndpoint);
        }

        Ok(Self {
            http_client: http_client(timeout)?,
            rpc_urls,
            dao_address: dao_address.to_string(),
        })
    }

    async fn eth_call(&self, rpc_url: &Url, data: &str) -> Result<String, ClientError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: json!([{ "to": self.dao_address, "data": data }, "latest"]),
        };

        let response = self
            .http_client
            .post(rpc_url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let body = response.json::<RpcResponse>().await?;

        match (body.result, body.error) {
            (_, Some(err)) => Err(ClientError::RpcError {
                code: err.code,
                message: err.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ClientError::MalformedResult(
                "response has neither result nor error".to_string(),
            )),
        }
    }
}

#[async_trait::async_trait]
impl EpochSource for EthRpcClient {
    async fn current_epoch(&self) -> Result<u64, ClientError> {
        let data = encode_call(EPOCH_SIGNATURE);
        let mut last_error = ClientError::NoRpcEndpoint;

        for rpc_url in &self.rpc_urls {
            match self.eth_call(rpc_url, &data).await {
                Ok(result) => return decode_u64_word(&result),
                Err(e) => {
                    tracing::warn!(
                        rpc = %rpc_url,
                        error = %e,
                        "epoch() call failed, trying next RPC endpoint",
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

fn function_selector(signature: &str) -> [u8; 4] {
    let mut hasher = tiny_keccak::Keccak::v256();
    hasher.update(signature.as_bytes());
    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Calldata of an argument-less function: `0x` + 4-byte selector.
pub fn encode_call(signature: &str) -> String {
    format!("0x{}", hex::encode(function_selector(signature)))
}

/// Decodes an ABI `uint256` return word that must fit in a `u64`.
pub fn decode_u64_word(result: &str) -> Result<u64, ClientError> {
    let digits = result
        .strip_prefix("0x")
        .or_else(|| result.strip_prefix("0X"))
        .unwrap_or(result);

    let bytes = hex::decode(digits)
        .map_err(|e| ClientError::MalformedResult(format!("{result}: {e}")))?;

    if bytes.is_empty() || bytes.len() > 32 {
        return Err(ClientError::MalformedResult(format!(
            "expected a 32-byte word, got {} bytes",
            bytes.len()
        )));
    }

    let split = bytes.len().saturating_sub(8);
    let (high, low) = bytes.split_at(split);
    if high.iter().any(|b| *b != 0) {
        return Err(ClientError::MalformedResult(format!(
            "{result} does not fit in 64 bits"
        )));
    }

    Ok(low.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}
