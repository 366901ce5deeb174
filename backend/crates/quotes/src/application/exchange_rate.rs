//! Exchange Rate Client
//!
//! Fetches the USD→TL rate from an external HTTP source. The calculator
//! never fetches anything itself: the rate is resolved here and passed in.
//! Any failure (network, HTTP status, body shape, non-positive rate) falls
//! back to the configured constant, so callers always get a usable rate.

use std::sync::Arc;

use serde::Deserialize;

use crate::application::config::QuotesConfig;

/// Response shape of the rate source (USD base)
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: RatesBody,
}

#[derive(Debug, Deserialize)]
struct RatesBody {
    #[serde(rename = "TRY")]
    try_rate: Option<f64>,
}

/// HTTP client for the USD→TL rate with a constant fallback
#[derive(Clone)]
pub struct ExchangeRateClient {
    http: reqwest::Client,
    config: Arc<QuotesConfig>,
}

impl ExchangeRateClient {
    pub fn new(config: Arc<QuotesConfig>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.exchange_rate_timeout)
            .build()
            .unwrap_or_default();

        Self { http, config }
    }

    /// Current TL per 1 USD; never fails
    pub async fn usd_to_tl_rate(&self) -> f64 {
        match self.fetch().await {
            Ok(rate) if rate > 0.0 => rate,
            Ok(rate) => {
                tracing::warn!(rate, "Rate source returned a non-positive rate, using fallback");
                self.config.fallback_exchange_rate
            }
            Err(e) => {
                tracing::warn!(error = %e, "Exchange rate fetch failed, using fallback");
                self.config.fallback_exchange_rate
            }
        }
    }

    async fn fetch(&self) -> Result<f64, reqwest::Error> {
        let response = self
            .http
            .get(&self.config.exchange_rate_url)
            .send()
            .await?
            .error_for_status()?;

        let body: RatesResponse = response.json().await?;
        Ok(body.rates.try_rate.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_response_parsing() {
        let json = r#"{"base":"USD","rates":{"TRY":32.85,"EUR":0.92}}"#;
        let parsed: RatesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rates.try_rate, Some(32.85));
    }

    #[test]
    fn test_rates_response_missing_try() {
        let json = r#"{"rates":{"EUR":0.92}}"#;
        let parsed: RatesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rates.try_rate, None);
    }

    #[tokio::test]
    async fn test_unreachable_source_falls_back() {
        let config = Arc::new(QuotesConfig {
            exchange_rate_url: "http://127.0.0.1:1/rates".to_string(),
            exchange_rate_timeout: std::time::Duration::from_millis(200),
            ..QuotesConfig::default()
        });

        let client = ExchangeRateClient::new(config.clone());
        let rate = client.usd_to_tl_rate().await;
        assert_eq!(rate, config.fallback_exchange_rate);
    }
}
