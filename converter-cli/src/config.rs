//! Configuration from flags and environment.

use clap::{Args, ValueEnum};

use converter_client::{DEFAULT_QUOTE_URL, QuoteClient, QuoteConfig};
use converter_repo::DEFAULT_HISTORY_KEY;
use converter_types::{CurrencyCode, FetchError, RateFetcher};

/// Application configuration.
#[derive(Debug, Args)]
pub struct Config {
    /// Quote service endpoint
    #[arg(long, env = "QUOTE_API_URL", default_value = DEFAULT_QUOTE_URL)]
    pub quote_url: String,

    /// API key for the quote service
    #[arg(long, env = "QUOTE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// History location: a directory, `sqlite://<file>` or `memory:`
    #[arg(long, env = "CONVERTER_STORE", default_value = ".converter")]
    pub store: String,

    /// Name of the stored history record
    #[arg(long, env = "CONVERTER_HISTORY_KEY", default_value = DEFAULT_HISTORY_KEY)]
    pub history_key: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// Builds the rate source. A missing API key is not an error until a
    /// conversion is attempted.
    pub fn rate_source(&self) -> anyhow::Result<RateSource> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                let config = QuoteConfig::new(&self.quote_url, key)?;
                Ok(RateSource::Quote(QuoteClient::new(config)))
            }
            _ => Ok(RateSource::Unconfigured),
        }
    }
}

/// The rate fetcher the binary runs with.
pub enum RateSource {
    Quote(QuoteClient),
    Unconfigured,
}

#[async_trait::async_trait]
impl RateFetcher for RateSource {
    async fn fetch_rate(
        &self,
        base: CurrencyCode,
        target: CurrencyCode,
    ) -> Result<f64, FetchError> {
        match self {
            RateSource::Quote(client) => client.fetch_rate(base, target).await,
            RateSource::Unconfigured => Err(FetchError::Unknown(
                "no API key configured (set QUOTE_API_KEY or pass --api-key)".into(),
            )),
        }
    }
}
