//! Application Configuration
//!
//! Configuration for the quotes application layer.

use std::time::Duration;

/// Default tax rate for newly added items (Turkish KDV, percent)
pub const DEFAULT_TAX_PERCENT: f64 = 20.0;

/// Fallback TL-per-USD rate when the external source is unavailable
pub const FALLBACK_EXCHANGE_RATE: f64 = 30.0;

/// Quotes application configuration
#[derive(Debug, Clone)]
pub struct QuotesConfig {
    /// Default per-item tax rate for new quotations (kdvRate seed)
    pub default_tax_percent: f64,
    /// TL per 1 USD used when the rate source fails
    pub fallback_exchange_rate: f64,
    /// Exchange-rate source endpoint (USD base)
    pub exchange_rate_url: String,
    /// Timeout for the rate fetch
    pub exchange_rate_timeout: Duration,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            default_tax_percent: DEFAULT_TAX_PERCENT,
            fallback_exchange_rate: FALLBACK_EXCHANGE_RATE,
            exchange_rate_url: "https://api.exchangerate-api.com/v4/latest/USD".to_string(),
            exchange_rate_timeout: Duration::from_secs(5),
        }
    }
}
