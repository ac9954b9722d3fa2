//! Notices handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::ConversionRecord;
use crate::error::{ConvertError, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short, user-facing report of an operation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn converted(record: &ConversionRecord) -> Self {
        Self::success("Conversion complete", record.summary())
    }

    pub fn convert_failed(err: &ConvertError) -> Self {
        match err {
            ConvertError::InvalidAmount(_) => {
                Self::error("Invalid amount", "Please enter a valid amount")
            }
            ConvertError::ConversionFailed(cause) => Self::error(
                "Conversion failed",
                format!("There was an error converting the currency: {}", cause),
            ),
        }
    }

    pub fn history_cleared() -> Self {
        Self::success("History cleared", "Conversion history has been cleared")
    }

    pub fn delete_failed(err: &StorageError) -> Self {
        Self::error(
            "Storage error",
            format!("Could not delete saved history: {}", err),
        )
    }

    pub fn load_failed(err: &StorageError) -> Self {
        Self::error(
            "Storage error",
            format!("Could not load saved history: {}", err),
        )
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FetchError;
    use crate::CurrencyCode;

    #[test]
    fn test_convert_failed_wraps_cause() {
        let err = ConvertError::ConversionFailed(FetchError::Transport { status: 500 });
        let notice = Notice::convert_failed(&err);

        assert!(notice.is_error());
        assert_eq!(notice.title, "Conversion failed");
        assert!(notice.message.contains("Status: 500"));
    }

    #[test]
    fn test_invalid_amount_notice() {
        let notice = Notice::convert_failed(&ConvertError::InvalidAmount(String::new()));
        assert_eq!(notice.to_string(), "Invalid amount: Please enter a valid amount");
    }

    #[test]
    fn test_rate_not_found_message() {
        let err = ConvertError::from(FetchError::RateNotFound(CurrencyCode::PHP));
        assert!(Notice::convert_failed(&err).message.ends_with("Conversion rate for PHP not found"));
    }
}
