//! # Converter Client
//!
//! A typed client for the quote service, implementing [`RateFetcher`].

use converter_types::{CurrencyCode, FetchError, RateFetcher};
use exchange_rates::{QuoteShapeError, rate_from_body};
use reqwest::Client;
use tracing::{debug, instrument, warn};

/// Default quote-service endpoint.
pub const DEFAULT_QUOTE_URL: &str = "https://api.freecurrencyapi.com/v1/latest";

/// Error type for client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Quote endpoint must be an http(s) URL, got {0:?}")]
    InvalidEndpoint(String),

    #[error("Quote API key is empty")]
    MissingApiKey,
}

/// Where to fetch quotes from and how to authenticate.
#[derive(Clone)]
pub struct QuoteConfig {
    endpoint: String,
    api_key: String,
}

impl QuoteConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into().trim().to_string();
        let api_key = api_key.into().trim().to_string();

        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Self { endpoint, api_key })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for QuoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Quote-service client.
pub struct QuoteClient {
    config: QuoteConfig,
    http: Client,
}

impl QuoteClient {
    /// Creates a new client.
    pub fn new(config: QuoteConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl RateFetcher for QuoteClient {
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    async fn fetch_rate(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<f64, FetchError> {
        debug!("Requesting rate");
        let resp = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("apikey", self.config.api_key.as_str()),
                ("currencies", target.code()),
                ("base_currency", base.code()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Unknown(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Quote service answered {}", status);
            return Err(FetchError::Transport {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Unknown(e.to_string()))?;

        let rate = rate_from_body(&body, target).map_err(|e| match e {
            QuoteShapeError::Malformed(reason) => FetchError::Unknown(reason),
            QuoteShapeError::MissingRate(code) => FetchError::RateNotFound(code),
        })?;
        debug!(rate, "Rate received");
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = QuoteConfig::new(DEFAULT_QUOTE_URL, "fca_live_test").unwrap();
        assert_eq!(config.endpoint(), DEFAULT_QUOTE_URL);
    }

    #[test]
    fn test_config_rejects_bad_endpoint() {
        let err = QuoteConfig::new("ftp://quotes.example", "key").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint(_)));
    }

    #[test]
    fn test_config_rejects_blank_key() {
        let err = QuoteConfig::new(DEFAULT_QUOTE_URL, "  ").unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_config_debug_hides_key() {
        let config = QuoteConfig::new(DEFAULT_QUOTE_URL, "secret-key").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
