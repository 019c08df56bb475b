use std::sync::Arc;

use pragma_common::services::{Service, ServiceRunner};

use dsd_client::{EpochSource, SnapshotSource};
use dsd_metrics::LoaderMetrics;

use crate::{config::LoaderConfig, service::LoaderService, state::SharedDashboard};

pub struct LoaderTask {
    epoch_source: Arc<dyn EpochSource>,
    snapshot_source: Arc<dyn SnapshotSource>,
    dashboard: SharedDashboard,
    config: LoaderConfig,
    metrics: Arc<LoaderMetrics>,
}

impl LoaderTask {
    pub fn new(
        epoch_source: Arc<dyn EpochSource>,
        snapshot_source: Arc<dyn SnapshotSource>,
        dashboard: SharedDashboard,
        config: LoaderConfig,
        metrics: Arc<LoaderMetrics>,
    ) -> Self {
        Self {
            epoch_source,
            snapshot_source,
            dashboard,
            config,
            metrics,
        }
    }
}

#[async_trait::async_trait]
impl Service for LoaderTask {
    async fn start<'a>(&mut self, mut runner: ServiceRunner<'a>) -> anyhow::Result<()> {
        let epoch_source = self.epoch_source.clone();
        let snapshot_source = self.snapshot_source.clone();
        let dashboard = self.dashboard.clone();
        let config = self.config.clone();
        let metrics = self.metrics.clone();

        runner.spawn_loop(move |ctx| async move {
            let loader_service =
                LoaderService::new(epoch_source, snapshot_source, dashboard, config)
                    .with_metrics(metrics);

            if let Some(result) = ctx.run_until_cancelled(loader_service.run_forever()).await {
                result?;
            }

            anyhow::Ok(())
        });

        Ok(())
    }
}
