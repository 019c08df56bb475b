mod rpc;
mod snapshots;

use std::time::Duration;

use reqwest::Client;

use crate::error::ClientError;

pub use rpc::{EthRpcClient, decode_u64_word, encode_call};
pub use snapshots::SnapshotApiClient;

pub fn http_client(timeout: Duration) -> Result<Client, ClientError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        ClientError::HttpError(e)
    })
}
