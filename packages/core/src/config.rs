use std::env;
use std::str::FromStr;

use crate::cli::Cli;

pub const DEFAULT_ETHERSCAN_URL: &str = "https://api.etherscan.io/api";
pub const DEFAULT_GAS_STATION_URL: &str = "https://ethgasstation.info/api/ethgasAPI.json";
pub const DEFAULT_HISTORY_DAYS: u32 = 14;
pub const DEFAULT_REFRESH_INTERVAL_SECONDS: u64 = 5 * 60;
pub const DEFAULT_API_PORT: u16 = 8080;

#[derive(Clone)]
pub struct Config {
    pub etherscan_url: String,
    pub etherscan_api_key: String,
    pub gas_station_url: String,
    pub history_days: u32,
    pub refresh_interval_seconds: u64,
    pub api_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("etherscan_url", &self.etherscan_url)
            .field("etherscan_api_key", &"<redacted>")
            .field("gas_station_url", &self.gas_station_url)
            .field("history_days", &self.history_days)
            .field("refresh_interval_seconds", &self.refresh_interval_seconds)
            .field("api_port", &self.api_port)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from any variable lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let etherscan_api_key = lookup("ETHERSCAN_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or("ETHERSCAN_API_KEY is required")?;

        let etherscan_url =
            lookup("ETHERSCAN_API_URL").unwrap_or_else(|| DEFAULT_ETHERSCAN_URL.to_string());
        let gas_station_url =
            lookup("GAS_STATION_URL").unwrap_or_else(|| DEFAULT_GAS_STATION_URL.to_string());

        let history_days = parse_positive(&lookup, "HISTORY_DAYS", DEFAULT_HISTORY_DAYS)?;
        let refresh_interval_seconds = parse_positive(
            &lookup,
            "REFRESH_INTERVAL_SECONDS",
            DEFAULT_REFRESH_INTERVAL_SECONDS,
        )?;
        let api_port = parse_positive(&lookup, "API_PORT", DEFAULT_API_PORT)?;

        Ok(Self {
            etherscan_url,
            etherscan_api_key,
            gas_station_url,
            history_days,
            refresh_interval_seconds,
            api_port,
        })
    }

    /// Command-line flags take precedence over environment values.
    pub fn apply_cli(mut self, cli: &Cli) -> Result<Self, String> {
        if let Some(url) = &cli.etherscan_url {
            self.etherscan_url = url.clone();
        }
        if let Some(url) = &cli.gas_station_url {
            self.gas_station_url = url.clone();
        }
        if let Some(days) = cli.days {
            if days == 0 {
                return Err("--days must be a positive number".to_string());
            }
            self.history_days = days;
        }
        if let Some(interval) = cli.refresh_interval {
            if interval == 0 {
                return Err("--refresh-interval must be a positive number".to_string());
            }
            self.refresh_interval_seconds = interval;
        }
        if let Some(port) = cli.port {
            self.api_port = port;
        }
        Ok(self)
    }
}

fn parse_positive<F, T>(lookup: &F, name: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => Ok(value),
            _ => Err(format!("{} must be a positive number", name)),
        },
    }
}
