//! # Converter Repository
//!
//! History store adapters for the converter.
//! Each adapter implements the `HistoryStore` port over one named record.

use async_trait::async_trait;
use converter_types::{ConversionRecord, HistoryStore, StorageError};

pub mod codec;
pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use codec::{decode_history, encode_history};
pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Default name of the stored history record.
pub const DEFAULT_HISTORY_KEY: &str = "conversionHistory";

/// Unified store wrapper selected at startup.
pub enum Store {
    File(FileStore),
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

/// Build a store from a location string.
///
/// - `memory:` keeps the history in process
/// - `sqlite:...` opens a SQLite database (needs the `sqlite` feature)
/// - anything else is a directory, optionally prefixed with `file://`
///
/// # Examples
///
/// ```ignore
/// let store = build_store(".converter", DEFAULT_HISTORY_KEY).await?;
/// let store = build_store("sqlite://converter.db?mode=rwc", DEFAULT_HISTORY_KEY).await?;
/// ```
pub async fn build_store(location: &str, key: &str) -> anyhow::Result<Store> {
    validate_key(key)?;

    if location == "memory:" {
        return Ok(Store::Memory(MemoryStore::new()));
    }

    if location.starts_with("sqlite:") {
        #[cfg(feature = "sqlite")]
        return Ok(Store::Sqlite(SqliteStore::new(location, key).await?));

        #[cfg(not(feature = "sqlite"))]
        anyhow::bail!("SQLite store requested but the `sqlite` feature is not enabled");
    }

    let dir = location.strip_prefix("file://").unwrap_or(location);
    if dir.is_empty() {
        anyhow::bail!("History store location is empty");
    }
    Ok(Store::File(FileStore::new(dir, key)))
}

/// A key names one record and doubles as a file name, so it must stay a
/// single path component.
fn validate_key(key: &str) -> anyhow::Result<()> {
    if key.trim().is_empty() {
        anyhow::bail!("History key is empty");
    }
    if key.contains(['/', '\\']) || key.contains("..") {
        anyhow::bail!("History key `{}` must not contain path separators or `..`", key);
    }
    Ok(())
}

impl Store {
    pub fn kind(&self) -> &'static str {
        match self {
            Store::File(_) => "file",
            Store::Memory(_) => "memory",
            #[cfg(feature = "sqlite")]
            Store::Sqlite(_) => "sqlite",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement HistoryStore for Store (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HistoryStore for Store {
    async fn load(&self) -> Result<Option<Vec<ConversionRecord>>, StorageError> {
        match self {
            Store::File(s) => s.load().await,
            Store::Memory(s) => s.load().await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(s) => s.load().await,
        }
    }

    async fn save(&self, history: &[ConversionRecord]) -> Result<(), StorageError> {
        match self {
            Store::File(s) => s.save(history).await,
            Store::Memory(s) => s.save(history).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(s) => s.save(history).await,
        }
    }

    async fn delete(&self) -> Result<(), StorageError> {
        match self {
            Store::File(s) => s.delete().await,
            Store::Memory(s) => s.delete().await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(s) => s.delete().await,
        }
    }
}
