use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, errors::ApiError, handlers};

pub fn api_router<T: OpenApiT>() -> Router<AppState> {
    let open_api = T::openapi();

    Router::new()
        .route("/health", get(health))
        .route("/v1/epoch", get(handlers::get_epoch))
        .route("/v1/status", get(handlers::get_status))
        .route("/v1/dao", get(handlers::get_dao_stats))
        .route("/v1/lp", get(handlers::get_lp_stats))
        .route("/v1/coupons", get(handlers::get_coupons_stats))
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> ApiError {
    ApiError::NotFound("The requested resource was not found".to_string())
}
