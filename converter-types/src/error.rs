//! Error types for the converter.

use crate::ports::FetchError;

/// Errors returned by a conversion attempt.
///
/// Neither variant changes session state.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Conversion failed: {0}")]
    ConversionFailed(#[source] FetchError),
}

impl From<FetchError> for ConvertError {
    fn from(err: FetchError) -> Self {
        ConvertError::ConversionFailed(err)
    }
}

/// Storage-level errors (history load, save and delete failures).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
