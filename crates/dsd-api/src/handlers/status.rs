use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    AppState,
    dto::{ApiResponse, StatusResponse},
};

#[utoipa::path(
    get,
    path = "/v1/status",
    tag = "Protocol",
    responses(
        (status = 200, description = "Loading state of every dataset", body = ApiResponse<StatusResponse>)
    )
)]
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    Json(ApiResponse::ok(StatusResponse::from(&*dashboard)))
}
