use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::analytics::{
    error::ProviderError,
    provider::{GasPriceSource, ProviderResult},
    types::PriceQuote,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Etherscan gas oracle.
#[derive(Clone)]
pub struct EtherscanClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl EtherscanClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            base_url,
            api_key,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Envelope for every Etherscan response. `result` is an object on success
/// and an error string otherwise.
#[derive(Debug, Deserialize)]
pub struct EtherscanEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub result: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GasOracle {
    pub safe_gas_price: String,
    pub propose_gas_price: String,
    pub fast_gas_price: String,
}

impl GasOracle {
    pub fn to_quote(&self) -> ProviderResult<PriceQuote> {
        Ok(PriceQuote {
            safe: parse_gwei("SafeGasPrice", &self.safe_gas_price)?,
            standard: parse_gwei("ProposeGasPrice", &self.propose_gas_price)?,
            fast: parse_gwei("FastGasPrice", &self.fast_gas_price)?,
        })
    }
}

fn parse_gwei(field: &str, raw: &str) -> ProviderResult<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| ProviderError::format(format!("Invalid {} '{}': {}", field, raw, e)))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ProviderError::format(format!("Invalid {} '{}'", field, raw)));
    }
    Ok(value)
}

impl EtherscanClient {
    pub async fn fetch_gas_oracle(&self) -> ProviderResult<GasOracle> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("module", "gastracker"),
                ("action", "gasoracle"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| ProviderError::network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::network(format!(
                "Etherscan returned HTTP {}",
                response.status()
            )));
        }

        let envelope = response
            .json::<EtherscanEnvelope>()
            .await
            .map_err(|err| ProviderError::format(err.to_string()))?;

        if envelope.status != "1" {
            return Err(ProviderError::StatusError {
                status: envelope.status,
                message: match envelope.result {
                    Value::String(reason) => format!("{} ({})", envelope.message, reason),
                    _ => envelope.message,
                },
            });
        }

        serde_json::from_value(envelope.result)
            .map_err(|err| ProviderError::format(format!("Failed to parse gas oracle: {}", err)))
    }
}

#[async_trait]
impl GasPriceSource<PriceQuote> for EtherscanClient {
    async fn fetch_quote(&self) -> ProviderResult<PriceQuote> {
        self.fetch_gas_oracle().await?.to_quote()
    }

    fn provider_name(&self) -> &str {
        "etherscan"
    }
}
