//! Exchange rate abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A cryptocurrency priced in a fiat currency, e.g. ETH in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub crypto: String,
    pub fiat: String,
}

impl CurrencyPair {
    pub fn new(crypto: &str, fiat: &str) -> Self {
        CurrencyPair {
            crypto: crypto.to_string(),
            fiat: fiat.to_string(),
        }
    }
}

impl Default for CurrencyPair {
    fn default() -> Self {
        CurrencyPair::new("eth", "USD")
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.crypto.to_uppercase(),
            self.fiat.to_uppercase()
        )
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Price of one unit of `pair.crypto` expressed in `pair.fiat`.
    async fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64>;
}
