const ETHERSCAN_URL: &str = "https://etherscan.io";

pub fn address_url(address: &str) -> String {
    format!("{ETHERSCAN_URL}/address/{address}")
}

pub fn block_url(block: u64) -> String {
    format!("{ETHERSCAN_URL}/block/{block}")
}
