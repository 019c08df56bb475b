use num_bigint::BigUint;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{amount::parse_amount, error::StatsError};

/// A snapshot document as served by the snapshot API.
///
/// Every field is kept as raw JSON so that a malformed document surfaces as a
/// [`StatsError`] at format time instead of failing the download, and so that
/// the document's key order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_block: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsd_per_uni_v2: Option<Value>,
}

impl Snapshot {
    pub fn accounts(&self) -> Result<&Map<String, Value>, StatsError> {
        match &self.accounts {
            None | Some(Value::Null) => Err(StatsError::missing("accounts")),
            Some(Value::Object(accounts)) => Ok(accounts),
            Some(other) => Err(StatsError::parse("accounts", other.to_string())),
        }
    }

    /// Decodes every account record, in document order.
    pub fn records<T: DeserializeOwned>(&self) -> Result<Vec<(&str, T)>, StatsError> {
        self.accounts()?
            .iter()
            .map(|(address, value)| {
                T::deserialize(value)
                    .map(|record| (address.as_str(), record))
                    .map_err(|e| StatsError::parse(format!("accounts.{address}"), e.to_string()))
            })
            .collect()
    }

    /// Block the snapshot was taken at, if the document carries one.
    pub fn last_update_block(&self) -> Result<Option<u64>, StatsError> {
        match &self.last_update_block {
            None | Some(Value::Null) => Ok(None),
            Some(value) => numeric("lastUpdateBlock", value)?
                .to_epoch("lastUpdateBlock")
                .map(Some),
        }
    }

    pub fn dsd_per_uni_v2(&self) -> Result<BigUint, StatsError> {
        match &self.dsd_per_uni_v2 {
            None | Some(Value::Null) => Err(StatsError::missing("dsdPerUniV2")),
            Some(value) => numeric("dsdPerUniV2", value)?.to_amount("dsdPerUniV2"),
        }
    }
}

fn numeric(field: &str, value: &Value) -> Result<Numeric, StatsError> {
    Numeric::deserialize(value).map_err(|_| StatsError::parse(field, value.to_string()))
}

/// A numeric field that the snapshot API emits either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(u64),
    Text(String),
}

impl Numeric {
    pub fn to_amount(&self, field: &str) -> Result<BigUint, StatsError> {
        match self {
            Self::Int(value) => Ok(BigUint::from(*value)),
            Self::Text(raw) => parse_amount(field, raw),
        }
    }

    pub fn to_epoch(&self, field: &str) -> Result<u64, StatsError> {
        match self {
            Self::Int(value) => Ok(*value),
            Self::Text(raw) => {
                if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(StatsError::parse(field, raw.as_str()));
                }
                raw.parse()
                    .map_err(|_| StatsError::parse(field, raw.as_str()))
            }
        }
    }
}

fn optional_amount(value: Option<&Numeric>, field: String) -> Result<BigUint, StatsError> {
    value.map_or(Ok(BigUint::ZERO), |v| v.to_amount(&field))
}

/// Staking record of the DAO and LP snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(default)]
    pub staged: Option<Numeric>,
    #[serde(default)]
    pub claimable: Option<Numeric>,
    #[serde(default)]
    pub fluid_until: Option<Numeric>,
}

impl AccountRecord {
    pub fn staged(&self, address: &str) -> Result<BigUint, StatsError> {
        optional_amount(self.staged.as_ref(), format!("accounts.{address}.staged"))
    }

    pub fn claimable(&self, address: &str) -> Result<BigUint, StatsError> {
        optional_amount(
            self.claimable.as_ref(),
            format!("accounts.{address}.claimable"),
        )
    }

    pub fn fluid_until(&self, address: &str) -> Result<u64, StatsError> {
        let field = format!("accounts.{address}.fluidUntil");
        self.fluid_until
            .as_ref()
            .ok_or_else(|| StatsError::missing(field.as_str()))?
            .to_epoch(&field)
    }
}

/// Coupon purchases of one account in the Coupons-Purchased snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponAccount {
    #[serde(default)]
    pub purchases: Vec<CouponPurchase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPurchase {
    #[serde(default)]
    pub epoch: Option<Numeric>,
    #[serde(default)]
    pub dsd_amount: Option<Numeric>,
    #[serde(default)]
    pub coupon_amount: Option<Numeric>,
}

impl CouponPurchase {
    pub fn epoch(&self, address: &str) -> Result<u64, StatsError> {
        let field = format!("accounts.{address}.purchases.epoch");
        self.epoch
            .as_ref()
            .ok_or_else(|| StatsError::missing(field.as_str()))?
            .to_epoch(&field)
    }

    pub fn dsd_amount(&self, address: &str) -> Result<BigUint, StatsError> {
        optional_amount(
            self.dsd_amount.as_ref(),
            format!("accounts.{address}.purchases.dsdAmount"),
        )
    }

    pub fn coupon_amount(&self, address: &str) -> Result<BigUint, StatsError> {
        optional_amount(
            self.coupon_amount.as_ref(),
            format!("accounts.{address}.purchases.couponAmount"),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_accounts() {
        let snapshot: Snapshot = serde_json::from_value(json!({ "lastUpdateBlock": 1 })).unwrap();
        assert!(matches!(
            snapshot.records::<AccountRecord>(),
            Err(StatsError::MissingData(field)) if field == "accounts"
        ));
    }

    #[test]
    fn test_records_keep_document_order() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"accounts": {"0xc": {"fluidUntil": 1}, "0xa": {"fluidUntil": 2}, "0xb": {"fluidUntil": 3}}}"#,
        )
        .unwrap();
        let addresses: Vec<&str> = snapshot
            .records::<AccountRecord>()
            .unwrap()
            .into_iter()
            .map(|(address, _)| address)
            .collect();
        assert_eq!(addresses, vec!["0xc", "0xa", "0xb"]);
    }

    #[test]
    fn test_fluid_until_as_string_or_number() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "accounts": {
                "0xa": { "staged": "1", "fluidUntil": "12" },
                "0xb": { "staged": "1", "fluidUntil": 13 },
            }
        }))
        .unwrap();
        let records = snapshot.records::<AccountRecord>().unwrap();
        assert_eq!(records[0].1.fluid_until("0xa").unwrap(), 12);
        assert_eq!(records[1].1.fluid_until("0xb").unwrap(), 13);
    }

    #[test]
    fn test_malformed_fields() {
        let record = AccountRecord {
            staged: Some(Numeric::Text("1.5".to_string())),
            claimable: None,
            fluid_until: Some(Numeric::Text("ten".to_string())),
        };
        assert!(matches!(record.staged("0xa"), Err(StatsError::Parse { .. })));
        assert!(matches!(record.fluid_until("0xa"), Err(StatsError::Parse { .. })));
        assert_eq!(record.claimable("0xa").unwrap(), BigUint::ZERO);

        let record = AccountRecord {
            staged: None,
            claimable: None,
            fluid_until: None,
        };
        assert!(matches!(
            record.fluid_until("0xa"),
            Err(StatsError::MissingData(field)) if field == "accounts.0xa.fluidUntil"
        ));
    }

    #[test]
    fn test_record_with_wrong_shape() {
        let snapshot: Snapshot =
            serde_json::from_value(json!({ "accounts": { "0xa": "not a record" } })).unwrap();
        assert!(matches!(
            snapshot.records::<AccountRecord>(),
            Err(StatsError::Parse { field, .. }) if field == "accounts.0xa"
        ));
    }

    #[test]
    fn test_accounts_of_the_wrong_type() {
        let snapshot: Snapshot = serde_json::from_value(json!({ "accounts": [] })).unwrap();
        assert!(matches!(
            snapshot.accounts(),
            Err(StatsError::Parse { field, .. }) if field == "accounts"
        ));
    }

    #[test]
    fn test_last_update_block() {
        let snapshot: Snapshot =
            serde_json::from_value(json!({ "lastUpdateBlock": "11400000" })).unwrap();
        assert_eq!(snapshot.last_update_block().unwrap(), Some(11_400_000));

        let snapshot: Snapshot =
            serde_json::from_value(json!({ "lastUpdateBlock": 11_400_001 })).unwrap();
        assert_eq!(snapshot.last_update_block().unwrap(), Some(11_400_001));

        assert_eq!(Snapshot::default().last_update_block().unwrap(), None);

        for malformed in [json!("eleven"), json!(-1), json!(1.5), json!({})] {
            let snapshot: Snapshot =
                serde_json::from_value(json!({ "lastUpdateBlock": malformed })).unwrap();
            assert!(matches!(
                snapshot.last_update_block(),
                Err(StatsError::Parse { field, .. }) if field == "lastUpdateBlock"
            ));
        }
    }

    #[test]
    fn test_dsd_per_uni_v2() {
        let snapshot = Snapshot::default();
        assert!(matches!(
            snapshot.dsd_per_uni_v2(),
            Err(StatsError::MissingData(_))
        ));

        let snapshot: Snapshot =
            serde_json::from_value(json!({ "dsdPerUniV2": "1500000000000000000" })).unwrap();
        assert_eq!(
            snapshot.dsd_per_uni_v2().unwrap(),
            BigUint::from(1_500_000_000_000_000_000u64)
        );

        let snapshot: Snapshot = serde_json::from_value(json!({ "dsdPerUniV2": true })).unwrap();
        assert!(matches!(
            snapshot.dsd_per_uni_v2(),
            Err(StatsError::Parse { field, .. }) if field == "dsdPerUniV2"
        ));
    }
}
