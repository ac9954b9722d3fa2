//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has no IO dependencies: only data structures, the rules that
//! validate them, and the traits adapters implement.
//!
//! ## Architecture
//!
//! - `domain/` - Conversion requests and recorded conversions
//! - `ports/` - Rate fetcher and history store traits
//! - `dto/` - Notices handed to the presentation layer
//! - `error/` - Conversion and storage error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ConversionRecord, ConversionRequest};
pub use dto::{Notice, NoticeLevel};
pub use error::{ConvertError, StorageError};
pub use exchange_rates::{Amount, CurrencyCode};
pub use ports::{FetchError, HistoryStore, RateFetcher};
