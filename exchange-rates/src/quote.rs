//! Quote-service response schema.
//!
//! The service answers `{ "data": { "<CODE>": <number>, ... } }`. The body is
//! checked against that shape explicitly instead of being indexed blindly.

use serde_json::Value;

use crate::CurrencyCode;

/// Why a response body did not yield a rate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteShapeError {
    /// The body is not JSON at all.
    #[error("Malformed quote body: {0}")]
    Malformed(String),

    /// The body is JSON but carries no usable rate for the currency.
    #[error("Conversion rate for {0} not found")]
    MissingRate(CurrencyCode),
}

/// Extracts the rate for `target` from a quote-service response body.
///
/// A rate must be a finite number greater than zero.
pub fn rate_from_body(body: &str, target: CurrencyCode) -> Result<f64, QuoteShapeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| QuoteShapeError::Malformed(e.to_string()))?;

    value
        .get("data")
        .and_then(Value::as_object)
        .and_then(|rates| rates.get(target.code()))
        .and_then(Value::as_f64)
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or(QuoteShapeError::MissingRate(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_found() {
        let body = r#"{"data":{"JPY":150.5,"PHP":57.1}}"#;
        assert_eq!(rate_from_body(body, CurrencyCode::JPY), Ok(150.5));
        assert_eq!(rate_from_body(body, CurrencyCode::PHP), Ok(57.1));
    }

    #[test]
    fn test_integer_rate_accepted() {
        let body = r#"{"data":{"USD":1}}"#;
        assert_eq!(rate_from_body(body, CurrencyCode::USD), Ok(1.0));
    }

    #[test]
    fn test_missing_target() {
        let body = r#"{"data":{"PHP":57.1}}"#;
        assert_eq!(
            rate_from_body(body, CurrencyCode::JPY),
            Err(QuoteShapeError::MissingRate(CurrencyCode::JPY))
        );
    }

    #[test]
    fn test_wrong_shapes_are_missing_rate() {
        for body in [
            r#"{}"#,
            r#"{"data":[]}"#,
            r#"{"data":{"JPY":"150.5"}}"#,
            r#"{"data":{"JPY":0}}"#,
            r#"{"data":{"JPY":-3.0}}"#,
            r#"{"message":"Invalid authentication credentials"}"#,
            r#"[1,2,3]"#,
        ] {
            assert_eq!(
                rate_from_body(body, CurrencyCode::JPY),
                Err(QuoteShapeError::MissingRate(CurrencyCode::JPY)),
                "body: {body}"
            );
        }
    }

    #[test]
    fn test_not_json() {
        let err = rate_from_body("<html>oops</html>", CurrencyCode::JPY).unwrap_err();
        assert!(matches!(err, QuoteShapeError::Malformed(_)));
    }
}
