use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::{DAO_ADDRESS, LP_ADDRESS};

/// One snapshot document served by the snapshot API, and one dashboard tab.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
    Dao,
    Lp,
    CouponsPurchased,
}

impl Dataset {
    pub const ALL: [Self; 3] = [Self::Dao, Self::Lp, Self::CouponsPurchased];

    /// File name of the snapshot under the snapshot API base url.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Dao => "DSD-DAO.json",
            Self::Lp => "DSD-LP.json",
            Self::CouponsPurchased => "DSD-Coupons-Purchased.json",
        }
    }

    /// Contract whose holdings the dataset describes.
    pub const fn contract_address(self) -> &'static str {
        match self {
            Self::Dao | Self::CouponsPurchased => DAO_ADDRESS,
            Self::Lp => LP_ADDRESS,
        }
    }
}

/// How the loader treats a refresh where some snapshot fetches fail.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Any failed fetch fails every dataset of the refresh.
    #[default]
    AllOrNothing,
    /// Each dataset succeeds or fails on its own.
    Independent,
}
