use dsd_stats::Snapshot;
use dsd_types::Dataset;

use crate::error::ClientError;

/// Source of the protocol's current epoch.
#[async_trait::async_trait]
pub trait EpochSource: Send + Sync {
    async fn current_epoch(&self) -> Result<u64, ClientError>;
}

/// Source of the precomputed snapshot documents.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self, dataset: Dataset) -> Result<Snapshot, ClientError>;
}
