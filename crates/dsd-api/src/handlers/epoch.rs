use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    AppState,
    dto::{ApiResponse, EpochResponse},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/v1/epoch",
    tag = "Protocol",
    responses(
        (status = 200, description = "Current epoch of the DAO", body = ApiResponse<EpochResponse>),
        (status = 503, description = "Epoch not resolved yet")
    )
)]
pub async fn get_epoch(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let dashboard = state.dashboard.read().await;
    let epoch = dashboard.epoch().ok_or_else(|| {
        ApiError::ServiceUnavailable("Epoch has not been resolved yet".to_string())
    })?;

    Ok(Json(ApiResponse::ok(EpochResponse::new(
        epoch,
        &dashboard,
        &state.loader_config,
    ))))
}
