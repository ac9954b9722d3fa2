//! Conversion request and recorded conversion.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use exchange_rates::{Amount, CurrencyCode};

use crate::error::ConvertError;

/// A validated conversion attempt.
///
/// Built fresh from the pending input each time a conversion is requested.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    amount_text: String,
    amount: f64,
    from_currency: CurrencyCode,
    to_currency: CurrencyCode,
}

impl ConversionRequest {
    /// Validates the entered amount text.
    ///
    /// The text must be non-empty and parse as a finite number greater than
    /// zero. Surrounding whitespace is ignored.
    pub fn new(
        amount_text: &str,
        from_currency: CurrencyCode,
        to_currency: CurrencyCode,
    ) -> Result<Self, ConvertError> {
        let trimmed = amount_text.trim();
        if trimmed.is_empty() {
            return Err(ConvertError::InvalidAmount(amount_text.to_string()));
        }

        let amount: f64 = trimmed
            .parse()
            .map_err(|_| ConvertError::InvalidAmount(amount_text.to_string()))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConvertError::InvalidAmount(amount_text.to_string()));
        }

        Ok(Self {
            amount_text: trimmed.to_string(),
            amount,
            from_currency,
            to_currency,
        })
    }

    pub fn amount_text(&self) -> &str {
        &self.amount_text
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from_currency(&self) -> CurrencyCode {
        self.from_currency
    }

    pub fn to_currency(&self) -> CurrencyCode {
        self.to_currency
    }

    /// Completes the request with a fetched rate.
    ///
    /// Fails only when the product overflows the fixed-point range.
    pub fn complete(self, rate: f64) -> Result<ConversionRecord, ConvertError> {
        let result = Amount::from_product(self.amount, rate)
            .ok_or_else(|| ConvertError::InvalidAmount(self.amount_text.clone()))?;

        Ok(ConversionRecord {
            amount: self.amount_text,
            from_currency: self.from_currency,
            to_currency: self.to_currency,
            result,
            timestamp: Utc::now(),
        })
    }
}

/// A completed conversion.
///
/// Records are immutable once created and are kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    /// Amount as entered
    pub amount: String,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    /// Converted amount, rounded to two fractional digits
    pub result: Amount,
    /// When the conversion completed
    pub timestamp: DateTime<Utc>,
}

impl ConversionRecord {
    /// Creation time in the local timezone, e.g. `2026-10-19 14:03:11`.
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// One-line summary, e.g. `100 USD = 15050.00 JPY`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} = {} {}",
            self.amount, self.from_currency, self.result, self.to_currency
        )
    }
}
