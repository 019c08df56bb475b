pub mod clients;
pub mod error;
pub mod traits;

pub use clients::{EthRpcClient, SnapshotApiClient};
pub use error::ClientError;
pub use traits::{EpochSource, SnapshotSource};
