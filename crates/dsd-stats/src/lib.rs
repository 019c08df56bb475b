//! Pure formatting of DSD snapshot documents into hierarchical tree views and
//! chart series. Nothing in this crate performs I/O.

pub mod amount;
pub mod bucket;
pub mod coupons;
pub mod dao;
pub mod error;
pub mod lp;
pub mod snapshot;
pub mod tree;

use serde::Serialize;
use utoipa::ToSchema;

use dsd_types::Dataset;

pub use coupons::{CouponStats, format_coupon_purchases_stats};
pub use dao::{DaoStats, format_dao_stats};
pub use error::StatsError;
pub use lp::{LpStats, format_lp_stats};
pub use snapshot::{AccountRecord, CouponAccount, CouponPurchase, Numeric, Snapshot};
pub use tree::{ChartPoint, TreeNode};

/// Formatted result of any dataset.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DatasetStats {
    Dao(DaoStats),
    Lp(LpStats),
    CouponsPurchased(CouponStats),
}

/// Dispatches to the formatter of `dataset`.
pub fn format_snapshot(
    dataset: Dataset,
    snapshot: &Snapshot,
    epoch: u64,
) -> Result<DatasetStats, StatsError> {
    Ok(match dataset {
        Dataset::Dao => DatasetStats::Dao(format_dao_stats(snapshot, epoch)?),
        Dataset::Lp => DatasetStats::Lp(format_lp_stats(snapshot, epoch)?),
        Dataset::CouponsPurchased => {
            DatasetStats::CouponsPurchased(format_coupon_purchases_stats(snapshot, epoch)?)
        }
    })
}
