//! Durable key-value storage.
//!
//! Session data is stored as opaque string values under fixed keys. Writes
//! replace the whole value; there is no partial update or merge.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Row, Sqlite};

use crate::error_handling::StorageError;

use super::migrations::run_migrations;
use super::pool::{init_db_pool_with_path, init_memory_pool};

/// A durable string-to-string store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// [`KeyValueStore`] backed by the `kv_store` SQLite table.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file at `path` and applies migrations.
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        let pool = init_db_pool_with_path(path).await?;
        Self::from_pool(pool).await
    }

    /// Opens a throwaway in-memory store.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = init_memory_pool().await?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, applying migrations first.
    pub async fn from_pool(pool: Arc<Pool<Sqlite>>) -> Result<Self, StorageError> {
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &Arc<Pool<Sqlite>> {
        &self.pool
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;
        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(self.pool.as_ref())
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let store = SqliteStore::in_memory().await.expect("store");
        assert_eq!(store.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = SqliteStore::in_memory().await.expect("store");
        store.put("k", "[1,2]").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[1,2]"));
    }

    #[tokio::test]
    async fn test_put_replaces_whole_value() {
        let store = SqliteStore::in_memory().await.expect("store");
        store.put("k", "first value").await.unwrap();
        store.put("k", "2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("2"));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(store.pool().as_ref())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("intel.db");

        let store = SqliteStore::open(&path).await.expect("open");
        store.put("history", "[]").await.unwrap();
        store.pool().close().await;

        let reopened = SqliteStore::open(&path).await.expect("reopen");
        assert_eq!(reopened.get("history").await.unwrap().as_deref(), Some("[]"));
    }
}
