pub mod dataset;
pub mod etherscan;

pub use dataset::{Dataset, JoinMode};

/// DSD DAO contract, exposes `epoch()`.
pub const DAO_ADDRESS: &str = "0x6bf977ed1a09214e6209f4ea5f525261f1a2690a";

/// DSD-USDC Uniswap V2 LP incentivization pool.
pub const LP_ADDRESS: &str = "0x70A87e1b97436D2F194B8B9EBF337bFc7521C70f";

/// Fixed-point precision of DSD and the LP token.
pub const TOKEN_DECIMALS: u32 = 18;
