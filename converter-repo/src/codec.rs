//! Serialized form of the conversion history.
//!
//! Every adapter stores the same thing: a JSON array of records in insertion
//! order.

use converter_types::{ConversionRecord, StorageError};

/// Serializes a history for storage.
pub fn encode_history(history: &[ConversionRecord]) -> Result<String, StorageError> {
    serde_json::to_string(history).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Deserializes a stored history.
pub fn decode_history(raw: &str) -> Result<Vec<ConversionRecord>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_types::{ConversionRequest, CurrencyCode};

    fn record(amount: &str, rate: f64) -> ConversionRecord {
        ConversionRequest::new(amount, CurrencyCode::USD, CurrencyCode::PHP)
            .unwrap()
            .complete(rate)
            .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_order_and_duplicates() {
        let history = vec![record("10", 57.0), record("2.5", 56.9), record("10", 57.0)];

        let raw = encode_history(&history).unwrap();
        let decoded = decode_history(&raw).unwrap();

        assert_eq!(decoded, history);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(encode_history(&[]).unwrap(), "[]");
        assert!(decode_history("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_stored_document() {
        let raw = r#"[{"amount":"100","fromCurrency":"USD","toCurrency":"JPY","result":"15050.00","timestamp":"2026-10-19T08:30:00Z"}]"#;
        let history = decode_history(raw).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].to_currency, CurrencyCode::JPY);
        assert_eq!(history[0].result.hundredths(), 1505000);
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_history("{not json").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
