use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub loader: Arc<LoaderMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            loader: LoaderMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct LoaderMetrics {
    epoch_resolutions: Counter<u64>,
    snapshot_fetches: Counter<u64>,
}

impl LoaderMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("dsd-onchain-activity");
        let epoch_resolutions = meter
            .u64_counter("epoch_resolutions_total")
            .with_description("Number of epoch() calls against the DAO contract")
            .with_unit("count")
            .init();

        let snapshot_fetches = meter
            .u64_counter("snapshot_fetches_total")
            .with_description("Number of snapshot documents fetched and formatted")
            .with_unit("count")
            .init();

        Arc::new(Self {
            epoch_resolutions,
            snapshot_fetches,
        })
    }

    pub fn record_epoch_resolution(&self, outcome: Outcome) {
        self.epoch_resolutions
            .add(1, &[KeyValue::new("outcome", outcome.as_str())]);
    }

    pub fn record_snapshot_fetch(&self, dataset: &str, outcome: Outcome) {
        self.snapshot_fetches.add(
            1,
            &[
                KeyValue::new("dataset", dataset.to_string()),
                KeyValue::new("outcome", outcome.as_str()),
            ],
        );
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }

    pub const fn from_ok(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Failure }
    }
}
