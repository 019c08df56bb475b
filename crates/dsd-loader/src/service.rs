use std::sync::Arc;

use anyhow::{Result, bail};
use futures::future::join_all;

use dsd_client::{ClientError, EpochSource, SnapshotSource};
use dsd_metrics::{LoaderMetrics, Outcome};
use dsd_stats::{Snapshot, format_snapshot};
use dsd_types::{Dataset, JoinMode};

use crate::{
    config::LoaderConfig,
    state::{DatasetView, SharedDashboard},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSummary {
    pub epoch: u64,
    pub loaded: usize,
    pub failed: usize,
}

pub struct LoaderService {
    epoch_source: Arc<dyn EpochSource>,
    snapshot_source: Arc<dyn SnapshotSource>,
    dashboard: SharedDashboard,
    config: LoaderConfig,
    metrics: Option<Arc<LoaderMetrics>>,
}

impl LoaderService {
    pub fn new(
        epoch_source: Arc<dyn EpochSource>,
        snapshot_source: Arc<dyn SnapshotSource>,
        dashboard: SharedDashboard,
        config: LoaderConfig,
    ) -> Self {
        Self {
            epoch_source,
            snapshot_source,
            dashboard,
            config,
            metrics: None,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<LoaderMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn run_forever(&self) -> Result<()> {
        loop {
            match self.refresh().await {
                Ok(summary) => tracing::info!(
                    "[LoaderService] 📊 Refreshed at epoch {}. Loaded: {}, Failed: {}",
                    summary.epoch,
                    summary.loaded,
                    summary.failed
                ),
                Err(e) => tracing::error!("[LoaderService] 🔴 Refresh failed: {e}"),
            }

            if self.config.refresh_interval.is_zero() {
                tracing::info!("[LoaderService] Refresh interval is zero, not refreshing again");
                std::future::pending::<()>().await;
            }

            tokio::time::sleep(self.config.refresh_interval).await;
        }
    }

    /// Resolves the epoch, fetches every snapshot concurrently and formats them.
    ///
    /// Only an epoch failure is returned as an error; dataset failures are
    /// recorded in the dashboard state and counted in the summary.
    pub async fn refresh(&self) -> Result<RefreshSummary> {
        self.dashboard.write().await.begin_refresh();

        let epoch = match self.epoch_source.current_epoch().await {
            Ok(epoch) => {
                self.record_epoch(Outcome::Success);
                epoch
            }
            Err(e) => {
                self.record_epoch(Outcome::Failure);
                let mut dashboard = self.dashboard.write().await;
                for dataset in Dataset::ALL {
                    dashboard.mark_failed(dataset, format!("Could not resolve epoch: {e}"));
                }
                bail!("Could not resolve epoch: {e}");
            }
        };
        self.dashboard.write().await.set_epoch(epoch);
        tracing::debug!(epoch, "[LoaderService] epoch resolved");

        let fetches = join_all(Dataset::ALL.into_iter().map(|dataset| async move {
            let result = self.snapshot_source.fetch_snapshot(dataset).await;
            (dataset, result)
        }))
        .await;

        for (dataset, result) in &fetches {
            self.record_fetch(*dataset, Outcome::from_ok(result.is_ok()));
        }

        if self.config.join_mode == JoinMode::AllOrNothing {
            let failures: Vec<String> = fetches
                .iter()
                .filter_map(|(dataset, result)| {
                    result.as_ref().err().map(|e| format!("{dataset}: {e}"))
                })
                .collect();

            if !failures.is_empty() {
                let message = format!("Snapshot fetch failed ({})", failures.join("; "));
                tracing::error!("[LoaderService] 🔴 {message}");
                let mut dashboard = self.dashboard.write().await;
                for dataset in Dataset::ALL {
                    dashboard.mark_failed(dataset, message.clone());
                }
                return Ok(RefreshSummary {
                    epoch,
                    loaded: 0,
                    failed: Dataset::ALL.len(),
                });
            }
        }

        let mut summary = RefreshSummary {
            epoch,
            loaded: 0,
            failed: 0,
        };

        for (dataset, result) in fetches {
            match self.format(dataset, epoch, result) {
                Ok(view) => {
                    self.dashboard.write().await.mark_loaded(view);
                    summary.loaded += 1;
                }
                Err(message) => {
                    tracing::error!(%dataset, "[LoaderService] 🔴 {message}");
                    self.dashboard.write().await.mark_failed(dataset, message);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    fn format(
        &self,
        dataset: Dataset,
        epoch: u64,
        fetched: Result<Snapshot, ClientError>,
    ) -> Result<DatasetView, String> {
        let snapshot = fetched.map_err(|e| format!("Snapshot fetch failed: {e}"))?;
        let reference_epoch = self.config.reference_epoch(dataset, epoch);
        let stats = format_snapshot(dataset, &snapshot, reference_epoch)
            .map_err(|e| format!("Malformed snapshot: {e}"))?;
        let last_update_block = snapshot
            .last_update_block()
            .map_err(|e| format!("Malformed snapshot: {e}"))?;

        Ok(DatasetView::new(
            dataset,
            epoch,
            reference_epoch,
            last_update_block,
            stats,
        ))
    }

    fn record_epoch(&self, outcome: Outcome) {
        if let Some(metrics) = &self.metrics {
            metrics.record_epoch_resolution(outcome);
        }
    }

    fn record_fetch(&self, dataset: Dataset, outcome: Outcome) {
        if let Some(metrics) = &self.metrics {
            metrics.record_snapshot_fetch(dataset.as_ref(), outcome);
        }
    }
}
