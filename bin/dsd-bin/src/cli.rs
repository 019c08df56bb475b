use clap::Parser;

use dsd_types::JoinMode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct DashboardCli {
    /// OTEL collector endpoint
    #[arg(long, env = "OTEL_COLLECTOR_ENDPOINT")]
    pub otel_collector_endpoint: Option<String>,

    /// API port
    #[arg(long, env = "API_PORT", default_value = "8080")]
    pub api_port: u16,

    /// Ethereum JSON-RPC endpoints, comma separated, by priority
    #[arg(
        long,
        env = "ETH_RPC_URLS",
        value_delimiter = ',',
        default_value = "https://cloudflare-eth.com"
    )]
    pub eth_rpc_urls: Vec<String>,

    /// Base url of the snapshot documents
    #[arg(long, env = "SNAPSHOT_BASE_URL", default_value = "https://api-dsd.oca.wtf/data/")]
    pub snapshot_base_url: String,

    /// DAO and LP holdings are shown when they unlock after `epoch - epoch_lag`
    #[arg(long, env = "EPOCH_LAG", default_value = "3")]
    pub epoch_lag: u64,

    /// Number of past epochs of coupon purchases to show
    #[arg(long, env = "COUPON_WINDOW", default_value = "30")]
    pub coupon_window: u64,

    /// `all_or_nothing` or `independent`
    #[arg(long, env = "JOIN_MODE", default_value = "all_or_nothing")]
    pub join_mode: JoinMode,

    /// Seconds between two refreshes, 0 to load once
    #[arg(long, env = "REFRESH_INTERVAL_SECS", default_value = "300")]
    pub refresh_interval_secs: u64,

    /// Timeout of upstream HTTP requests, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "30")]
    pub http_timeout_secs: u64,
}
