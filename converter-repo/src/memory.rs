//! In-process history store.

use std::sync::Mutex;

use async_trait::async_trait;
use converter_types::{ConversionRecord, HistoryStore, StorageError};

use crate::codec::{decode_history, encode_history};

/// Holds the serialized history in memory.
///
/// Goes through the same codec as the durable stores, so it behaves like
/// them apart from not surviving the process.
#[derive(Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored document, if any.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|raw| raw.clone())
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".into())
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<ConversionRecord>>, StorageError> {
        let raw = self.raw.lock().map_err(|_| poisoned())?.clone();
        raw.as_deref().map(decode_history).transpose()
    }

    async fn save(&self, history: &[ConversionRecord]) -> Result<(), StorageError> {
        let encoded = encode_history(history)?;
        *self.raw.lock().map_err(|_| poisoned())? = Some(encoded);
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        *self.raw.lock().map_err(|_| poisoned())? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_types::{ConversionRequest, CurrencyCode};

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_none());

        let record = ConversionRequest::new("3", CurrencyCode::PHP, CurrencyCode::USD)
            .unwrap()
            .complete(0.0175)
            .unwrap();
        store.save(std::slice::from_ref(&record)).await.unwrap();

        assert!(store.raw().unwrap().contains("\"result\":\"0.05\""));
        assert_eq!(store.load().await.unwrap(), Some(vec![record]));

        store.delete().await.unwrap();
        assert!(store.raw().is_none());
    }
}
