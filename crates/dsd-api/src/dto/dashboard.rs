use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use dsd_loader::{DashboardState, DatasetState, LoaderConfig};
use dsd_types::Dataset;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EpochResponse {
    pub epoch: u64,
    pub resolved_at: Option<String>, // RFC3339 timestamp
    /// DAO and LP holdings unlocking after this epoch are shown.
    pub fluid_reference_epoch: u64,
    /// Coupon purchases made after this epoch are shown.
    pub coupon_reference_epoch: u64,
}

impl EpochResponse {
    pub fn new(epoch: u64, state: &DashboardState, config: &LoaderConfig) -> Self {
        Self {
            epoch,
            resolved_at: state.epoch_resolved_at().map(|t| t.to_rfc3339()),
            fluid_reference_epoch: config.reference_epoch(Dataset::Dao, epoch),
            coupon_reference_epoch: config.reference_epoch(Dataset::CouponsPurchased, epoch),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatasetStatus {
    pub dataset: Dataset,
    /// One of `not_requested`, `loading`, `loaded`, `failed`.
    pub state: String,
    pub error: Option<String>,
    pub last_update_block: Option<u64>,
    pub fetched_at: Option<String>, // RFC3339 timestamp
}

impl DatasetStatus {
    pub fn new(dataset: Dataset, state: &DatasetState) -> Self {
        let (error, last_update_block, fetched_at) = match state {
            DatasetState::Loaded(view) => (
                None,
                view.last_update_block,
                Some(view.fetched_at.to_rfc3339()),
            ),
            DatasetState::Failed(error) => (Some(error.clone()), None, None),
            DatasetState::NotRequested | DatasetState::Loading => (None, None, None),
        };

        Self {
            dataset,
            state: state.as_str().to_string(),
            error,
            last_update_block,
            fetched_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub epoch: Option<u64>,
    pub datasets: Vec<DatasetStatus>,
}

impl From<&DashboardState> for StatusResponse {
    fn from(state: &DashboardState) -> Self {
        Self {
            epoch: state.epoch(),
            datasets: Dataset::ALL
                .into_iter()
                .map(|dataset| DatasetStatus::new(dataset, state.dataset(dataset)))
                .collect(),
        }
    }
}
