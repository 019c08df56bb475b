pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod router;

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use axum_tracing_opentelemetry::middleware::{OtelAxumLayer, OtelInResponseLayer};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use dsd_loader::{LoaderConfig, SharedDashboard};
use pragma_common::services::{Service, ServiceRunner};

use docs::ApiDoc;
use router::api_router;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: SharedDashboard,
    pub loader_config: LoaderConfig,
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }
}

fn cors_layer_from_env() -> CorsLayer {
    match env::var("CORS_ALLOWED_ORIGINS") {
        Ok(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    match HeaderValue::from_str(trimmed) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            tracing::warn!(
                                origin = trimmed,
                                error = %err,
                                "Invalid origin in CORS_ALLOWED_ORIGINS, skipping",
                            );
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS",
                );
                return CorsLayer::permissive();
            }

            tracing::info!(allowed = %origins, "Configured restricted CORS origins");

            // the dashboard is read-only
            CorsLayer::new()
                .allow_headers(AllowHeaders::mirror_request())
                .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
                .allow_origin(AllowOrigin::list(allowed_origins))
        }
        Err(_) => {
            tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
            CorsLayer::permissive()
        }
    }
}

#[async_trait::async_trait]
impl Service for ApiService {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        ApiDoc::generate_openapi_json("./".into())?;

        let host = self.host.clone();
        let port = self.port;
        let state = self.state.clone();

        runner.spawn_loop(move |ctx| async move {
            let address = format!("{host}:{port}");
            let socket_addr: SocketAddr = address.parse()?;
            let listener = TcpListener::bind(socket_addr).await?;

            let timeout_secs: u64 = env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30);

            #[allow(clippy::default_constructed_unit_structs)]
            let app = api_router::<ApiDoc>()
                .with_state(state)
                // include trace context as header into the response
                // start OpenTelemetry trace on incoming request
                .layer(OtelAxumLayer::default())
                .layer(OtelInResponseLayer::default())
                .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
                .layer(cors_layer_from_env());

            tracing::info!("🧩 API started at http://{}", socket_addr);

            let token = ctx.token.clone();
            let shutdown = async move { token.cancelled().await };

            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown)
            .await
            .context("😱 API server stopped!")
        });

        Ok(())
    }
}
