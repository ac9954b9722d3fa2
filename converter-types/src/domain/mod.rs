//! Domain models for the converter.

pub mod conversion;

pub use conversion::{ConversionRecord, ConversionRequest};
