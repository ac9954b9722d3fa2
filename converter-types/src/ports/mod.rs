//! Port traits (interfaces for adapters).
//!
//! The session depends on these traits, not on concrete implementations.

mod history;
mod rates;

pub use history::HistoryStore;
pub use rates::{FetchError, RateFetcher};
