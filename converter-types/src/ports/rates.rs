//! Rate fetcher port.
//!
//! Implementations can be HTTP clients, fixed-rate doubles for tests, etc.

use crate::CurrencyCode;

/// Error type for rate lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to fetch conversion data. Status: {status}")]
    Transport { status: u16 },

    #[error("Conversion rate for {0} not found")]
    RateNotFound(CurrencyCode),

    #[error("Rate lookup failed: {0}")]
    Unknown(String),
}

/// Port trait for exchange rate sources.
#[async_trait::async_trait]
pub trait RateFetcher: Send + Sync {
    /// Gets how many units of `target` one unit of `base` buys.
    ///
    /// One attempt per call: no retry and no caching.
    async fn fetch_rate(&self, base: CurrencyCode, target: CurrencyCode)
    -> Result<f64, FetchError>;
}
