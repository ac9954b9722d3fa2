//! Currency enumeration, fixed-point amounts and quote-response validation.
//!
//! This crate has no IO. It defines the closed set of currencies the converter
//! supports, the `Amount` type that converted results are held in, and the
//! schema check applied to a quote-service response body.
//!
//! # Example
//! ```
//! use exchange_rates::{Amount, CurrencyCode, rate_from_body};
//!
//! let body = r#"{"data":{"JPY":150.5}}"#;
//! let rate = rate_from_body(body, CurrencyCode::JPY).unwrap();
//!
//! let result = Amount::from_product(100.0, rate).unwrap();
//! assert_eq!(result.to_string(), "15050.00");
//! ```

mod amount;
mod quote;

pub use amount::{Amount, ParseAmountError};
pub use quote::{QuoteShapeError, rate_from_body};

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines the CurrencyCode enum and its lookups
// ─────────────────────────────────────────────────────────────────────────────

/// Defines the supported currencies.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     CurrencyName => ("CODE", "Display name"),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $display:literal)
        ),* $(,)?
    ) => {
        /// A supported currency, identified by its three-letter code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            /// Human-readable name shown next to the code in selectors.
            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err(format!(
                        "Unknown currency: {}. Supported: {}",
                        s,
                        [$($code),*].join(", ")
                    )),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "United States"),
    AUD => ("AUD", "Australia"),
    JPY => ("JPY", "Japan"),
    PHP => ("PHP", "Philippines"),
}

impl CurrencyCode {
    /// Base currency a fresh session starts with.
    pub const DEFAULT_FROM: CurrencyCode = CurrencyCode::AUD;
    /// Target currency a fresh session starts with.
    pub const DEFAULT_TO: CurrencyCode = CurrencyCode::JPY;

    /// Selector label, e.g. `USD - United States`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.code(), self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
