use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use dsd_stats::DatasetStats;
use dsd_types::{Dataset, etherscan};

pub type SharedDashboard = Arc<RwLock<DashboardState>>;

/// Formatted dataset, ready to be served.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DatasetView {
    pub dataset: Dataset,
    pub contract_address: String,
    pub contract_url: String,
    /// Epoch read from the DAO.
    pub epoch: u64,
    /// Epoch the holdings were filtered against.
    pub reference_epoch: u64,
    pub last_update_block: Option<u64>,
    pub last_update_block_url: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub stats: DatasetStats,
}

impl DatasetView {
    pub fn new(
        dataset: Dataset,
        epoch: u64,
        reference_epoch: u64,
        last_update_block: Option<u64>,
        stats: DatasetStats,
    ) -> Self {
        let contract_address = dataset.contract_address();
        Self {
            dataset,
            contract_address: contract_address.to_string(),
            contract_url: etherscan::address_url(contract_address),
            epoch,
            reference_epoch,
            last_update_block,
            last_update_block_url: last_update_block.map(etherscan::block_url),
            fetched_at: Utc::now(),
            stats,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum DatasetState {
    #[default]
    NotRequested,
    Loading,
    Loaded(Arc<DatasetView>),
    Failed(String),
}

impl DatasetState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }

    /// A loaded dataset keeps serving its view until the refresh replaces it.
    fn begin_refresh(&mut self) {
        if !matches!(self, Self::Loaded(_)) {
            *self = Self::Loading;
        }
    }
}

/// Everything the dashboard shows, written by the loader only.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    epoch: Option<u64>,
    epoch_resolved_at: Option<DateTime<Utc>>,
    dao: DatasetState,
    lp: DatasetState,
    coupons_purchased: DatasetState,
}

impl DashboardState {
    pub fn shared() -> SharedDashboard {
        Arc::new(RwLock::new(Self::default()))
    }

    pub const fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    pub const fn epoch_resolved_at(&self) -> Option<DateTime<Utc>> {
        self.epoch_resolved_at
    }

    pub const fn dataset(&self, dataset: Dataset) -> &DatasetState {
        match dataset {
            Dataset::Dao => &self.dao,
            Dataset::Lp => &self.lp,
            Dataset::CouponsPurchased => &self.coupons_purchased,
        }
    }

    const fn dataset_mut(&mut self, dataset: Dataset) -> &mut DatasetState {
        match dataset {
            Dataset::Dao => &mut self.dao,
            Dataset::Lp => &mut self.lp,
            Dataset::CouponsPurchased => &mut self.coupons_purchased,
        }
    }

    pub fn begin_refresh(&mut self) {
        for dataset in Dataset::ALL {
            self.dataset_mut(dataset).begin_refresh();
        }
    }

    pub fn set_epoch(&mut self, epoch: u64) {
        self.epoch = Some(epoch);
        self.epoch_resolved_at = Some(Utc::now());
    }

    pub fn mark_loaded(&mut self, view: DatasetView) {
        let dataset = view.dataset;
        *self.dataset_mut(dataset) = DatasetState::Loaded(Arc::new(view));
    }

    pub fn mark_failed(&mut self, dataset: Dataset, error: impl Into<String>) {
        *self.dataset_mut(dataset) = DatasetState::Failed(error.into());
    }
}

#[cfg(test)]
mod tests {
    use dsd_stats::{DaoStats, DatasetStats};

    use super::*;

    fn dao_view() -> DatasetView {
        DatasetView::new(
            Dataset::Dao,
            10,
            7,
            Some(11_000_000),
            DatasetStats::Dao(DaoStats {
                tree: vec![],
                bar: vec![],
            }),
        )
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::default();
        assert_eq!(state.epoch(), None);
        for dataset in Dataset::ALL {
            assert_eq!(state.dataset(dataset).as_str(), "not_requested");
        }
    }

    #[test]
    fn test_transitions() {
        let mut state = DashboardState::default();
        state.begin_refresh();
        assert!(matches!(state.dataset(Dataset::Dao), DatasetState::Loading));

        state.set_epoch(10);
        state.mark_loaded(dao_view());
        state.mark_failed(Dataset::Lp, "boom");
        assert_eq!(state.epoch(), Some(10));
        assert!(state.epoch_resolved_at().is_some());
        assert_eq!(state.dataset(Dataset::Dao).as_str(), "loaded");
        assert!(matches!(state.dataset(Dataset::Lp), DatasetState::Failed(e) if e == "boom"));
        assert_eq!(state.dataset(Dataset::CouponsPurchased).as_str(), "loading");

        // next refresh: loaded data stays visible, failures go back to loading
        state.begin_refresh();
        assert_eq!(state.dataset(Dataset::Dao).as_str(), "loaded");
        assert_eq!(state.dataset(Dataset::Lp).as_str(), "loading");
    }

    #[test]
    fn test_mark_loaded_targets_the_view_dataset() {
        let mut state = DashboardState::default();
        state.mark_loaded(dao_view());

        let DatasetState::Loaded(view) = state.dataset(Dataset::Dao) else {
            panic!("dao should be loaded");
        };
        assert_eq!(view.dataset, Dataset::Dao);
        assert_eq!(view.reference_epoch, 7);
        assert_eq!(state.dataset(Dataset::Lp).as_str(), "not_requested");
        assert_eq!(
            state.dataset(Dataset::CouponsPurchased).as_str(),
            "not_requested"
        );
    }

    #[test]
    fn test_view_links() {
        let view = dao_view();
        assert_eq!(view.contract_address, dsd_types::DAO_ADDRESS);
        assert_eq!(
            view.last_update_block_url.as_deref(),
            Some("https://etherscan.io/block/11000000")
        );
        assert!(view.contract_url.ends_with(dsd_types::DAO_ADDRESS));
    }
}
