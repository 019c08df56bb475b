pub mod datasets;
pub mod epoch;
pub mod status;

pub use datasets::{get_coupons_stats, get_dao_stats, get_lp_stats};
pub use epoch::get_epoch;
pub use status::get_status;
