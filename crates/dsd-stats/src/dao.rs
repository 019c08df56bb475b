use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    amount::{format_amount, format_percent},
    bucket::{EpochBuckets, RankedEntry, chart_series, directory, is_included},
    error::StatsError,
    snapshot::{AccountRecord, Snapshot},
    tree::{ChartPoint, TreeNode},
};

pub const FLUID_LABEL: &str = "Staged (Fluid)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DaoStats {
    pub tree: Vec<TreeNode>,
    pub bar: Vec<ChartPoint>,
}

pub(crate) fn dsd_file_extra(entry: &RankedEntry) -> String {
    format!(
        "{} DSD ({})",
        format_amount(entry.value),
        format_percent(entry.percent)
    )
}

/// DSD bonded in the DAO that becomes fluid after `epoch`, grouped by `fluidUntil`.
pub fn format_dao_stats(snapshot: &Snapshot, epoch: u64) -> Result<DaoStats, StatsError> {
    let mut buckets = EpochBuckets::default();

    for (address, record) in snapshot.records::<AccountRecord>()? {
        let staged = record.staged(address)?;
        let fluid_until = record.fluid_until(address)?;

        if is_included(fluid_until, epoch, &staged) {
            buckets.insert(fluid_until, address, staged, Default::default());
        }
    }

    let buckets = buckets.into_ranked();

    Ok(DaoStats {
        tree: vec![directory(FLUID_LABEL, &buckets, "DSD", dsd_file_extra)],
        bar: chart_series(&buckets),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snapshot(value: serde_json::Value) -> Snapshot {
        serde_json::from_value(value).unwrap()
    }

    /// `"100.00 DSD (66.67%)"` -> `66.67`
    fn shown_percent(extra: &str) -> f64 {
        let (_, percent) = extra.rsplit_once('(').unwrap();
        percent.trim_end_matches("%)").parse().unwrap()
    }

    #[test]
    fn test_two_accounts_share_a_bucket() {
        let snapshot = snapshot(json!({
            "lastUpdateBlock": 11_500_000,
            "accounts": {
                "A": { "staged": "100000000000000000000", "fluidUntil": 10 },
                "B": { "staged": "50000000000000000000", "fluidUntil": 10 },
                "C": { "staged": "0", "fluidUntil": 20 },
            }
        }));

        let stats = format_dao_stats(&snapshot, 5).unwrap();

        assert_eq!(stats.tree.len(), 1);
        let root = &stats.tree[0];
        assert_eq!(root.name(), FLUID_LABEL);
        assert_eq!(root.files().len(), 1);

        let bucket = root.child("10").unwrap();
        let files = bucket.files();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name(), "A");
        assert_eq!(files[0].extra(), "100.00 DSD (66.67%)");
        assert_eq!(files[1].name(), "B");
        assert_eq!(files[1].extra(), "50.00 DSD (33.33%)");
        assert_eq!(bucket.extra(), "150.00 DSD | 2 accounts");

        assert_eq!(
            stats.bar,
            vec![ChartPoint {
                name: "10".to_string(),
                value: 150.0
            }]
        );
    }

    #[test]
    fn test_fluid_until_equal_to_epoch_is_excluded() {
        let snapshot = snapshot(json!({
            "accounts": {
                "A": { "staged": "1000000000000000000", "fluidUntil": 5 },
                "B": { "staged": "1000000000000000000", "fluidUntil": "6" },
                "C": { "staged": "1000000000000000000", "fluidUntil": 4 },
            }
        }));

        let stats = format_dao_stats(&snapshot, 5).unwrap();
        let root = &stats.tree[0];
        assert_eq!(root.files().len(), 1);
        assert_eq!(root.files()[0].name(), "6");
        assert_eq!(root.files()[0].files()[0].name(), "B");
    }

    #[test]
    fn test_only_included_accounts_appear() {
        let snapshot = snapshot(json!({
            "accounts": {
                "0x1": { "staged": "3", "fluidUntil": 9 },
                "0x2": { "staged": "0", "fluidUntil": 9 },
                "0x3": { "fluidUntil": 9 },
                "0x4": { "staged": "7", "fluidUntil": 2 },
                "0x5": { "staged": "5", "fluidUntil": 12 },
                "0x6": { "staged": "8", "fluidUntil": 9 },
            }
        }));

        let stats = format_dao_stats(&snapshot, 3).unwrap();
        let mut shown: Vec<&str> = stats.tree[0]
            .files()
            .iter()
            .flat_map(TreeNode::files)
            .map(TreeNode::name)
            .collect();
        shown.sort_unstable();
        assert_eq!(shown, vec!["0x1", "0x5", "0x6"]);
    }

    #[test]
    fn test_percentages_sum_to_hundred_and_values_non_increasing() {
        let snapshot = snapshot(json!({
            "accounts": {
                "0x1": { "staged": "123456789012345678901", "fluidUntil": 9 },
                "0x2": { "staged": "987654321098765432", "fluidUntil": 9 },
                "0x3": { "staged": "333333333333333333333", "fluidUntil": 9 },
                "0x4": { "staged": "1", "fluidUntil": 9 },
                "0x5": { "staged": "42000000000000000000", "fluidUntil": 11 },
            }
        }));

        let stats = format_dao_stats(&snapshot, 0).unwrap();
        let buckets = stats.tree[0].files();
        assert_eq!(buckets.len(), 2);

        for bucket in buckets {
            let values: Vec<f64> = bucket.files().iter().filter_map(TreeNode::value).collect();
            assert!(values.windows(2).all(|w| w[0] >= w[1]));

            // rendered with 2 decimals, so each share is off by at most 0.005
            let percent_sum: f64 = bucket.files().iter().map(|f| shown_percent(f.extra())).sum();
            let tolerance = 0.005 * bucket.files().len() as f64 + 1e-9;
            assert!(
                (percent_sum - 100.0).abs() <= tolerance,
                "bucket {} sums to {percent_sum}",
                bucket.name()
            );
        }
    }

    #[test]
    fn test_buckets_sorted_numerically() {
        let snapshot = snapshot(json!({
            "accounts": {
                "0x1": { "staged": "1", "fluidUntil": 100 },
                "0x2": { "staged": "1", "fluidUntil": 20 },
                "0x3": { "staged": "1", "fluidUntil": 3 },
            }
        }));

        let stats = format_dao_stats(&snapshot, 0).unwrap();
        let labels: Vec<&str> = stats.bar.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(labels, vec!["3", "20", "100"]);
    }

    #[test]
    fn test_idempotent() {
        let snapshot = snapshot(json!({
            "accounts": {
                "0x1": { "staged": "10", "fluidUntil": 9 },
                "0x2": { "staged": "10", "fluidUntil": 9 },
                "0x3": { "staged": "30", "fluidUntil": 10 },
            }
        }));

        assert_eq!(
            format_dao_stats(&snapshot, 1).unwrap(),
            format_dao_stats(&snapshot, 1).unwrap()
        );
    }

    #[test]
    fn test_empty_accounts() {
        let stats = format_dao_stats(&snapshot(json!({ "accounts": {} })), 1).unwrap();
        assert!(stats.bar.is_empty());
        assert!(stats.tree[0].files().is_empty());
        assert_eq!(stats.tree[0].extra(), "0.00 DSD | 0 accounts");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            format_dao_stats(&Snapshot::default(), 1),
            Err(StatsError::MissingData(_))
        ));

        // excluded accounts are still validated
        let malformed = snapshot(json!({
            "accounts": { "0x1": { "staged": "12abc", "fluidUntil": 0 } }
        }));
        assert!(matches!(
            format_dao_stats(&malformed, 1),
            Err(StatsError::Parse { .. })
        ));
    }
}
