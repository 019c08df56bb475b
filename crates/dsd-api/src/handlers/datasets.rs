use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use dsd_loader::{DatasetState, DatasetView};
use dsd_types::Dataset;

use crate::{AppState, dto::ApiResponse, errors::ApiError};

async fn dataset_view(state: &AppState, dataset: Dataset) -> Result<Arc<DatasetView>, ApiError> {
    let dashboard = state.dashboard.read().await;
    match dashboard.dataset(dataset) {
        DatasetState::Loaded(view) => Ok(Arc::clone(view)),
        DatasetState::NotRequested | DatasetState::Loading => Err(ApiError::ServiceUnavailable(
            format!("{dataset} snapshot is loading"),
        )),
        DatasetState::Failed(error) => Err(ApiError::BadGateway(format!(
            "Failed to load {dataset} snapshot: {error}"
        ))),
    }
}

#[utoipa::path(
    get,
    path = "/v1/dao",
    tag = "Holdings",
    responses(
        (status = 200, description = "Staged DSD in the DAO grouped by unlock epoch", body = ApiResponse<DatasetView>),
        (status = 502, description = "Snapshot or epoch could not be loaded"),
        (status = 503, description = "Snapshot is loading")
    )
)]
pub async fn get_dao_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let view = dataset_view(&state, Dataset::Dao).await?;
    Ok(Json(ApiResponse::ok(view)))
}

#[utoipa::path(
    get,
    path = "/v1/lp",
    tag = "Holdings",
    responses(
        (status = 200, description = "Staged LP (as DSD) and claimable DSD grouped by unlock epoch", body = ApiResponse<DatasetView>),
        (status = 502, description = "Snapshot or epoch could not be loaded"),
        (status = 503, description = "Snapshot is loading")
    )
)]
pub async fn get_lp_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let view = dataset_view(&state, Dataset::Lp).await?;
    Ok(Json(ApiResponse::ok(view)))
}

#[utoipa::path(
    get,
    path = "/v1/coupons",
    tag = "Holdings",
    responses(
        (status = 200, description = "Coupon purchases grouped by purchase epoch", body = ApiResponse<DatasetView>),
        (status = 502, description = "Snapshot or epoch could not be loaded"),
        (status = 503, description = "Snapshot is loading")
    )
)]
pub async fn get_coupons_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let view = dataset_view(&state, Dataset::CouponsPurchased).await?;
    Ok(Json(ApiResponse::ok(view)))
}
