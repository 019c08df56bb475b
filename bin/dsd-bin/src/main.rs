mod cli;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use pragma_common::{
    services::{Service, ServiceGroup},
    telemetry::init_telemetry,
};
use url::Url;

use dsd_api::{ApiService, AppState};
use dsd_client::{EthRpcClient, SnapshotApiClient};
use dsd_loader::{DashboardState, LoaderConfig, LoaderTask};
use dsd_metrics::MetricsRegistry;
use dsd_types::DAO_ADDRESS;

use crate::cli::DashboardCli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let DashboardCli {
        otel_collector_endpoint,
        api_port,
        eth_rpc_urls,
        snapshot_base_url,
        epoch_lag,
        coupon_window,
        join_mode,
        refresh_interval_secs,
        http_timeout_secs,
    } = DashboardCli::parse();

    let app_name = "dsd_onchain_activity";
    if let Err(e) = init_telemetry(app_name, otel_collector_endpoint) {
        panic!("Could not init telemetry: {e}");
    }

    let http_timeout = Duration::from_secs(http_timeout_secs);

    let rpc_urls = eth_rpc_urls
        .iter()
        .map(|url| Url::parse(url.trim()).with_context(|| format!("Invalid RPC url {url}")))
        .collect::<Result<Vec<_>>>()?;
    let epoch_source = EthRpcClient::new(rpc_urls, DAO_ADDRESS, http_timeout)
        .context("Could not init the Ethereum RPC client")?;
    let snapshot_source = SnapshotApiClient::new(&snapshot_base_url, http_timeout)
        .context("Could not init the snapshot client")?;

    let loader_config = LoaderConfig {
        epoch_lag,
        coupon_window,
        join_mode,
        refresh_interval: Duration::from_secs(refresh_interval_secs),
    };
    tracing::info!(?loader_config, "Starting {app_name}");

    let dashboard = DashboardState::shared();
    let metrics = MetricsRegistry::new();

    let app_state = AppState {
        dashboard: dashboard.clone(),
        loader_config: loader_config.clone(),
    };
    let api_service = ApiService::new(app_state, "0.0.0.0", api_port);

    let loader_service = LoaderTask::new(
        Arc::new(epoch_source),
        Arc::new(snapshot_source),
        dashboard,
        loader_config,
        metrics.loader.clone(),
    );

    ServiceGroup::default()
        .with(api_service)
        .with(loader_service)
        .start_and_drive_to_end()
        .await?;

    Ok(())
}
