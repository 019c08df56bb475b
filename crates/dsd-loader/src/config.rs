use std::time::Duration;

use dsd_types::{Dataset, JoinMode};

/// Configuration for loader runtime behaviour.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// DAO and LP holdings are shown for `fluidUntil > epoch - epoch_lag`.
    pub epoch_lag: u64,
    /// Coupon purchases are shown for the last `coupon_window` epochs.
    pub coupon_window: u64,
    pub join_mode: JoinMode,
    /// Zero loads once and never refreshes.
    pub refresh_interval: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            epoch_lag: 3,
            coupon_window: 30,
            join_mode: JoinMode::AllOrNothing,
            refresh_interval: Duration::from_secs(5 * 60),
        }
    }
}

impl LoaderConfig {
    /// Epoch the formatter of `dataset` filters against.
    pub const fn reference_epoch(&self, dataset: Dataset, epoch: u64) -> u64 {
        match dataset {
            Dataset::Dao | Dataset::Lp => epoch.saturating_sub(self.epoch_lag),
            Dataset::CouponsPurchased => epoch.saturating_sub(self.coupon_window),
        }
    }
}
