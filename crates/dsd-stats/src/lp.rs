use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    amount::convert_lp_to_dsd,
    bucket::{EpochBuckets, chart_series, directory, is_included},
    dao::{FLUID_LABEL, dsd_file_extra},
    error::StatsError,
    snapshot::{AccountRecord, Snapshot},
    tree::{ChartPoint, TreeNode},
};

pub const CLAIMABLE_LABEL: &str = "Staged (Claimable)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LpStats {
    /// `Staged (Fluid)` then `Staged (Claimable)`.
    pub tree: Vec<TreeNode>,
    /// Staged LP, valued in DSD.
    pub bar: Vec<ChartPoint>,
    pub claimable_bar: Vec<ChartPoint>,
}

/// LP pool holdings that become fluid after `epoch`.
///
/// Staged LP tokens are valued in DSD through the snapshot's `dsdPerUniV2`
/// rate; claimable rewards are already DSD. Both sides are filtered, grouped
/// and ranked independently.
pub fn format_lp_stats(snapshot: &Snapshot, epoch: u64) -> Result<LpStats, StatsError> {
    let dsd_per_uni_v2 = snapshot.dsd_per_uni_v2()?;

    let mut fluid = EpochBuckets::default();
    let mut claimable = EpochBuckets::default();

    for (address, record) in snapshot.records::<AccountRecord>()? {
        let staged = record.staged(address)?;
        let claimable_amount = record.claimable(address)?;
        let fluid_until = record.fluid_until(address)?;

        if is_included(fluid_until, epoch, &staged) {
            let staged_dsd = convert_lp_to_dsd(&staged, &dsd_per_uni_v2);
            fluid.insert(fluid_until, address, staged_dsd, Default::default());
        }

        if is_included(fluid_until, epoch, &claimable_amount) {
            claimable.insert(fluid_until, address, claimable_amount, Default::default());
        }
    }

    let fluid = fluid.into_ranked();
    let claimable = claimable.into_ranked();

    Ok(LpStats {
        tree: vec![
            directory(FLUID_LABEL, &fluid, "DSD", dsd_file_extra),
            directory(CLAIMABLE_LABEL, &claimable, "DSD", dsd_file_extra),
        ],
        bar: chart_series(&fluid),
        claimable_bar: chart_series(&claimable),
    })
}
