use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    amount::{format_amount, format_percent, to_display},
    bucket::{EpochBuckets, RankedEntry, chart_series, directory, is_included},
    error::StatsError,
    snapshot::{CouponAccount, Snapshot},
    tree::{ChartPoint, TreeNode},
};

pub const COUPONS_LABEL: &str = "Coupons Purchased";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CouponStats {
    pub tree: Vec<TreeNode>,
    pub line: Vec<ChartPoint>,
}

fn coupon_file_extra(entry: &RankedEntry) -> String {
    format!(
        "{} coupons | {} DSD ({})",
        format_amount(entry.value),
        format_amount(to_display(&entry.secondary)),
        format_percent(entry.percent)
    )
}

/// Coupon purchases made after `epoch`, grouped by purchase epoch.
/// Accounts are ranked by coupons bought; the DSD burned is shown alongside.
pub fn format_coupon_purchases_stats(
    snapshot: &Snapshot,
    epoch: u64,
) -> Result<CouponStats, StatsError> {
    let mut buckets = EpochBuckets::default();

    for (address, account) in snapshot.records::<CouponAccount>()? {
        for purchase in &account.purchases {
            let purchase_epoch = purchase.epoch(address)?;
            let coupons = purchase.coupon_amount(address)?;
            let burned = purchase.dsd_amount(address)?;

            if is_included(purchase_epoch, epoch, &coupons) {
                buckets.insert(purchase_epoch, address, coupons, burned);
            }
        }
    }

    let buckets = buckets.into_ranked();

    Ok(CouponStats {
        tree: vec![directory(
            COUPONS_LABEL,
            &buckets,
            "coupons",
            coupon_file_extra,
        )],
        line: chart_series(&buckets),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snapshot(value: serde_json::Value) -> Snapshot {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_purchases_grouped_by_epoch() {
        let snapshot = snapshot(json!({
            "lastUpdateBlock": 11_600_000,
            "accounts": {
                "0xa": { "purchases": [
                    { "epoch": 40, "dsdAmount": "10000000000000000000", "couponAmount": "12000000000000000000" },
                    { "epoch": 41, "dsdAmount": "1000000000000000000", "couponAmount": "1500000000000000000" },
                ]},
                "0xb": { "purchases": [
                    { "epoch": "40", "dsdAmount": "30000000000000000000", "couponAmount": "36000000000000000000" },
                ]},
            }
        }));

        let stats = format_coupon_purchases_stats(&snapshot, 39).unwrap();
        let root = &stats.tree[0];
        assert_eq!(root.name(), COUPONS_LABEL);
        assert_eq!(root.extra(), "49.50 coupons | 2 accounts");

        let epoch_40 = root.child("40").unwrap();
        assert_eq!(epoch_40.extra(), "48.00 coupons | 2 accounts");
        assert_eq!(epoch_40.files()[0].name(), "0xb");
        assert_eq!(
            epoch_40.files()[0].extra(),
            "36.00 coupons | 30.00 DSD (75.00%)"
        );
        assert_eq!(
            epoch_40.files()[1].extra(),
            "12.00 coupons | 10.00 DSD (25.00%)"
        );

        let labels: Vec<&str> = stats.line.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(labels, vec!["40", "41"]);
        assert_eq!(stats.line[1].value, 1.5);
    }

    #[test]
    fn test_repeat_purchases_are_summed() {
        let snapshot = snapshot(json!({
            "accounts": {
                "0xa": { "purchases": [
                    { "epoch": 50, "dsdAmount": "1000000000000000000", "couponAmount": "2000000000000000000" },
                    { "epoch": 50, "dsdAmount": "1000000000000000000", "couponAmount": "2000000000000000000" },
                ]},
            }
        }));

        let stats = format_coupon_purchases_stats(&snapshot, 0).unwrap();
        let files = stats.tree[0].child("50").unwrap().files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extra(), "4.00 coupons | 2.00 DSD (100.00%)");
    }

    #[test]
    fn test_buyer_across_epochs_counts_once() {
        let snapshot = snapshot(json!({
            "accounts": {
                "0xa": { "purchases": [
                    { "epoch": 40, "dsdAmount": "1000000000000000000", "couponAmount": "1000000000000000000" },
                    { "epoch": 41, "dsdAmount": "1000000000000000000", "couponAmount": "1000000000000000000" },
                    { "epoch": 42, "dsdAmount": "1000000000000000000", "couponAmount": "1000000000000000000" },
                ]},
            }
        }));

        let stats = format_coupon_purchases_stats(&snapshot, 0).unwrap();
        let root = &stats.tree[0];
        assert_eq!(root.files().len(), 3);
        assert_eq!(root.extra(), "3.00 coupons | 1 account");
    }

    #[test]
    fn test_old_and_empty_purchases_are_excluded() {
        let snapshot = snapshot(json!({
            "accounts": {
                "0xa": { "purchases": [
                    { "epoch": 10, "dsdAmount": "1", "couponAmount": "1" },
                    { "epoch": 11, "dsdAmount": "0", "couponAmount": "0" },
                ]},
                "0xb": {},
            }
        }));

        let stats = format_coupon_purchases_stats(&snapshot, 10).unwrap();
        assert!(stats.line.is_empty());
        assert!(stats.tree[0].files().is_empty());
    }

    #[test]
    fn test_missing_purchase_epoch() {
        let snapshot = snapshot(json!({
            "accounts": { "0xa": { "purchases": [ { "couponAmount": "1" } ] } }
        }));
        assert!(matches!(
            format_coupon_purchases_stats(&snapshot, 0),
            Err(StatsError::MissingData(_))
        ));
    }
}
