//! Loader orchestrating epoch resolution, snapshot downloads and formatting.

pub mod config;
pub mod service;
pub mod state;
pub mod task;

pub use config::LoaderConfig;
pub use service::{LoaderService, RefreshSummary};
pub use state::{DashboardState, DatasetState, DatasetView, SharedDashboard};
pub use task::LoaderTask;
