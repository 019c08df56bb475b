use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::dto::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Upstream failure: {0}")]
    BadGateway(String),
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let msg = match self {
            Self::NotFound(msg) | Self::ServiceUnavailable(msg) | Self::BadGateway(msg) => msg,
            Self::InternalServerError => "Internal server error".to_string(),
        };
        let response: ApiResponse<()> = ApiResponse::error(msg);
        (status, Json(response)).into_response()
    }
}
