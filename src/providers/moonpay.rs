use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::rate::{CurrencyPair, RateProvider};

// MoonPayProvider implementation for RateProvider
pub struct MoonPayProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl MoonPayProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("moonrate/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(MoonPayProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn price_url(&self, pair: &CurrencyPair) -> Result<reqwest::Url> {
        let endpoint = format!(
            "{}/v3/currencies/{}/price",
            self.base_url,
            pair.crypto.to_lowercase()
        );
        reqwest::Url::parse_with_params(&endpoint, &[("apiKey", self.api_key.as_str())])
            .with_context(|| format!("Invalid price endpoint: {endpoint}"))
    }
}

/// Either `{"price": 3123.45}` or the fiat-keyed form `{"USD": 3123.45, "EUR": ...}`.
#[derive(Debug, Deserialize)]
struct MoonPayPriceResponse {
    price: Option<f64>,
    #[serde(flatten)]
    quotes: HashMap<String, serde_json::Value>,
}

impl MoonPayPriceResponse {
    fn price_in(&self, fiat: &str) -> Option<f64> {
        self.price.or_else(|| {
            self.quotes
                .iter()
                .find(|(code, _)| code.eq_ignore_ascii_case(fiat))
                .and_then(|(_, value)| value.as_f64())
        })
    }
}

#[async_trait]
impl RateProvider for MoonPayProvider {
    #[instrument(
        name = "MoonPayRateFetch",
        skip(self),
        fields(pair = %pair)
    )]
    async fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        if self.api_key.is_empty() {
            warn!("No MoonPay API key configured, the request may be rejected");
        }

        let url = self.price_url(pair)?;
        debug!("Requesting exchange rate from {}{}", self.base_url, url.path());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, pair))?;

        debug!(status = %response.status(), "Received MoonPay response");

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for currency pair: {}",
                response.status(),
                pair
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| anyhow!("Request error: {} for currency pair: {}", e, pair))?;

        let data: MoonPayPriceResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse price response for {}: {}", pair, e))?;

        data.price_in(&pair.fiat)
            .ok_or_else(|| anyhow!("No price found for currency pair: {}", pair))
    }
}
