use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::analytics::{
    error::ProviderError,
    provider::{GasPriceSource, ProviderResult},
    types::StationQuote,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the ETH Gas Station feed. Prices come back in tenths of a Gwei.
#[derive(Clone)]
pub struct GasStationClient {
    url: String,
    http: Client,
}

impl GasStationClient {
    pub fn new(url: String) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { url, http }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_station_quote(&self) -> ProviderResult<StationQuote> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|err| ProviderError::network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::network(format!(
                "Gas station returned HTTP {}",
                response.status()
            )));
        }

        let quote = response
            .json::<StationQuote>()
            .await
            .map_err(|err| ProviderError::format(format!("Failed to parse gas station payload: {}", err)))?;

        let tiers = [quote.safe_low, quote.average, quote.fast];
        if tiers.iter().any(|tier| !tier.is_finite() || *tier < 0.0) {
            return Err(ProviderError::format(format!("Negative gas station tier in {:?}", quote)));
        }

        Ok(quote)
    }
}

#[async_trait]
impl GasPriceSource<StationQuote> for GasStationClient {
    async fn fetch_quote(&self) -> ProviderResult<StationQuote> {
        self.fetch_station_quote().await
    }

    fn provider_name(&self) -> &str {
        "ethgasstation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn client_for(body: &str, status: u16) -> (GasStationClient, MockServer) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ethgasAPI.json"))
            .respond_with(ResponseTemplate::new(status).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;
        let client = GasStationClient::new(format!("{}/api/ethgasAPI.json", server.uri()));
        (client, server)
    }

    #[tokio::test]
    async fn fetch_quote_reads_tenths_of_gwei() {
        let body = r#"{"fast": 420.0, "fastest": 500.0, "safeLow": 210.0, "average": 300.0, "block_time": 13.2}"#;
        let (client, _server) = client_for(body, 200).await;

        let quote = client.fetch_quote().await.unwrap();

        assert_eq!(quote.safe_low, 210.0);
        assert_eq!(quote.to_gwei().fast, 42.0);
    }

    #[tokio::test]
    async fn missing_tier_is_a_format_error() {
        let (client, _server) = client_for(r#"{"fast": 420.0}"#, 200).await;
        let err = client.fetch_quote().await.unwrap_err();
        assert!(matches!(err, ProviderError::FormatError { .. }));
    }

    #[tokio::test]
    async fn server_error_is_a_network_error() {
        let (client, _server) = client_for("oops", 500).await;
        let err = client.fetch_quote().await.unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let client = GasStationClient::new("http://127.0.0.1:9/ethgasAPI.json".into());
        let err = client.fetch_quote().await.unwrap_err();
        assert!(matches!(err, ProviderError::NetworkError { .. }));
    }
}
