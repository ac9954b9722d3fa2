//! History store port.
//!
//! Holds one named record: the serialized, ordered conversion history.

use crate::domain::ConversionRecord;
use crate::error::StorageError;

#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Loads the stored history, or `None` when nothing has been stored.
    async fn load(&self) -> Result<Option<Vec<ConversionRecord>>, StorageError>;

    /// Replaces the stored history.
    async fn save(&self, history: &[ConversionRecord]) -> Result<(), StorageError>;

    /// Removes the stored history. Deleting an absent record succeeds.
    async fn delete(&self) -> Result<(), StorageError>;
}
