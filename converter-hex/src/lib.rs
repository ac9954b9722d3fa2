//! # Converter Hex
//!
//! The conversion session and the plumbing around it.
//!
//! ## Architecture
//!
//! - `session` - Conversion state machine (amount, pair, lock, history)
//! - `writer` - Ordered write queue in front of the history store
//! - `notify` - Delivery of notices to the presentation layer
//!
//! The session is generic over `F: RateFetcher`; the store is handed to the
//! write queue when the session opens.

pub mod notify;
pub mod session;
pub mod writer;


pub use notify::Notifier;
pub use session::{ConversionSession, SessionState};
pub use writer::{HistoryWriter, PendingDelete};
