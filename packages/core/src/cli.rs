use clap::Parser;

/// Ethereum gas optimizer CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "eth-gas-optimizer",
    version,
    about = "Ethereum gas fee trends and low-cost transaction windows"
)]
pub struct Cli {
    /// Etherscan API base URL
    #[arg(long)]
    pub etherscan_url: Option<String>,

    /// ETH Gas Station endpoint URL
    #[arg(long)]
    pub gas_station_url: Option<String>,

    /// Days of hourly history to generate
    #[arg(long)]
    pub days: Option<u32>,

    /// Refresh interval in seconds
    #[arg(long)]
    pub refresh_interval: Option<u64>,

    /// Port for the HTTP API
    #[arg(long)]
    pub port: Option<u16>,
}
