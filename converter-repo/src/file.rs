//! File-backed history store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use converter_types::{ConversionRecord, HistoryStore, StorageError};
use tracing::debug;

use crate::codec::{decode_history, encode_history};

/// Keeps the history as `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never sees a half-written document.
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Path of the stored record.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json.tmp", self.key))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn io_error(err: std::io::Error) -> StorageError {
    StorageError::Io(err.to_string())
}

#[async_trait]
impl HistoryStore for FileStore {
    async fn load(&self) -> Result<Option<Vec<ConversionRecord>>, StorageError> {
        match tokio::fs::read_to_string(self.path()).await {
            Ok(raw) => decode_history(&raw).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    async fn save(&self, history: &[ConversionRecord]) -> Result<(), StorageError> {
        let raw = encode_history(history)?;
        tokio::fs::create_dir_all(&self.dir).await.map_err(io_error)?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, raw).await.map_err(io_error)?;
        tokio::fs::rename(&temp, self.path()).await.map_err(io_error)?;

        debug!(path = %self.path().display(), entries = history.len(), "History written");
        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use converter_types::{ConversionRequest, CurrencyCode};

    fn record(amount: &str) -> ConversionRecord {
        ConversionRequest::new(amount, CurrencyCode::AUD, CurrencyCode::JPY)
            .unwrap()
            .complete(98.25)
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_absent_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "conversionHistory");

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"), "conversionHistory");
        let history = vec![record("1"), record("20")];

        store.save(&history).await.unwrap();

        assert!(store.path().ends_with("nested/conversionHistory.json"));
        assert_eq!(store.load().await.unwrap(), Some(history));
    }

    #[tokio::test]
    async fn test_save_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "h");

        store.save(&[record("1")]).await.unwrap();
        let second = vec![record("1"), record("2")];
        store.save(&second).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(second));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "h");
        store.save(&[record("5")]).await.unwrap();

        store.delete().await.unwrap();
        store.delete().await.unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), "h");
        std::fs::write(store.path(), "{{{").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
