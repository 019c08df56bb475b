use std::collections::{BTreeMap, HashMap, HashSet};

use num_bigint::BigUint;

use dsd_types::etherscan;

use crate::{
    amount::{format_amount, to_display},
    tree::{ChartPoint, TreeNode},
};

/// An account is shown when its bucket epoch is strictly after the reference
/// epoch and its amount is strictly positive.
pub fn is_included(bucket_epoch: u64, reference_epoch: u64, amount: &BigUint) -> bool {
    bucket_epoch > reference_epoch && *amount > BigUint::ZERO
}

/// Groups accounts by epoch. Amounts of an address inserted twice in the same
/// epoch are summed into one entry.
#[derive(Debug, Default)]
pub struct EpochBuckets {
    buckets: BTreeMap<u64, PendingBucket>,
}

#[derive(Debug, Default)]
struct PendingBucket {
    entries: Vec<BucketEntry>,
    positions: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketEntry {
    pub address: String,
    pub amount: BigUint,
    /// Companion amount rendered next to the main one (DSD burned for coupons).
    pub secondary: BigUint,
}

impl EpochBuckets {
    pub fn insert(&mut self, epoch: u64, address: &str, amount: BigUint, secondary: BigUint) {
        let bucket = self.buckets.entry(epoch).or_default();
        if let Some(&idx) = bucket.positions.get(address) {
            let entry = &mut bucket.entries[idx];
            entry.amount += amount;
            entry.secondary += secondary;
            return;
        }

        bucket
            .positions
            .insert(address.to_string(), bucket.entries.len());
        bucket.entries.push(BucketEntry {
            address: address.to_string(),
            amount,
            secondary,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in ascending epoch order, entries ranked by descending amount.
    pub fn into_ranked(self) -> Vec<Bucket> {
        self.buckets
            .into_iter()
            .map(|(epoch, pending)| Bucket::rank(epoch, pending.entries))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub epoch: u64,
    /// f64 sum of the display values of the entries.
    pub total: f64,
    pub entries: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub address: String,
    pub amount: BigUint,
    pub secondary: BigUint,
    pub value: f64,
    pub percent: f64,
}

impl Bucket {
    fn rank(epoch: u64, mut entries: Vec<BucketEntry>) -> Self {
        // exact comparison, stable so ties keep document order
        entries.sort_by(|a, b| b.amount.cmp(&a.amount));

        let values: Vec<f64> = entries.iter().map(|e| to_display(&e.amount)).collect();
        let total: f64 = values.iter().sum();

        let entries = entries
            .into_iter()
            .zip(values)
            .map(|(entry, value)| RankedEntry {
                address: entry.address,
                amount: entry.amount,
                secondary: entry.secondary,
                value,
                percent: if total > 0.0 {
                    value / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        Self {
            epoch,
            total,
            entries,
        }
    }

    pub fn chart_point(&self) -> ChartPoint {
        ChartPoint {
            name: self.epoch.to_string(),
            value: self.total,
        }
    }
}

fn count_label(count: usize) -> String {
    if count == 1 {
        "1 account".to_string()
    } else {
        format!("{count} accounts")
    }
}

fn directory_extra(total: f64, count: usize, unit: &str) -> String {
    format!("{} {unit} | {}", format_amount(total), count_label(count))
}

/// Builds the root directory `label` holding one directory per bucket.
pub fn directory<F>(label: &str, buckets: &[Bucket], unit: &str, file_extra: F) -> TreeNode
where
    F: Fn(&RankedEntry) -> String,
{
    let files: Vec<TreeNode> = buckets
        .iter()
        .map(|bucket| TreeNode::Directory {
            name: bucket.epoch.to_string(),
            extra: directory_extra(bucket.total, bucket.entries.len(), unit),
            files: bucket
                .entries
                .iter()
                .map(|entry| TreeNode::File {
                    name: entry.address.clone(),
                    extra: file_extra(entry),
                    value: entry.value,
                    href: etherscan::address_url(&entry.address),
                })
                .collect(),
        })
        .collect();

    let total: f64 = buckets.iter().map(|b| b.total).sum();
    // an address may appear in several buckets
    let count = buckets
        .iter()
        .flat_map(|b| b.entries.iter().map(|e| e.address.as_str()))
        .collect::<HashSet<_>>()
        .len();

    TreeNode::Directory {
        name: label.to_string(),
        extra: directory_extra(total, count, unit),
        files,
    }
}

pub fn chart_series(buckets: &[Bucket]) -> Vec<ChartPoint> {
    buckets.iter().map(Bucket::chart_point).collect()
}
