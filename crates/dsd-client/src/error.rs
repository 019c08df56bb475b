use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid url: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Malformed RPC result: {0}")]
    MalformedResult(String),

    #[error("No RPC endpoint configured")]
    NoRpcEndpoint,
}
