pub mod dashboard;
pub mod response;

pub use dashboard::*;
pub use response::*;
