//! SQLite history store.
#![allow(clippy::collapsible_if)]

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use converter_types::{ConversionRecord, HistoryStore, StorageError};

use crate::codec::{decode_history, encode_history};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Store
// ─────────────────────────────────────────────────────────────────────────────

/// Keeps the history as one row of a key/value table.
pub struct SqliteStore {
    pool: SqlitePool,
    key: String,
}

fn db_error(err: sqlx::Error) -> StorageError {
    StorageError::Database(err.to_string())
}

impl SqliteStore {
    /// Connects and runs the migration.
    pub async fn new(database_url: &str, key: impl Into<String>) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                if let Some(parent) = std::path::Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // One long-lived connection: an in-memory database lives and dies with it.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let ddl = include_str!("../migrations/0001_create_kv_store.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self {
            pool,
            key: key.into(),
        })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl HistoryStore for SqliteStore {
    async fn load(&self) -> Result<Option<Vec<ConversionRecord>>, StorageError> {
        let raw: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(&self.key)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        raw.as_deref().map(decode_history).transpose()
    }

    async fn save(&self, history: &[ConversionRecord]) -> Result<(), StorageError> {
        let raw = encode_history(history)?;

        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(&self.key)
        .bind(raw)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn delete(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(&self.key)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(())
    }
}
