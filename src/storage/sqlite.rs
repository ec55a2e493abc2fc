// SQLite-backed key-value store
//
// Values live in the `settings` table, one row per key. The schema is
// created through a small `_migrations` ledger the first time a database
// is opened.

use std::path::Path;

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};

use super::migrations::{statements, MIGRATION_001};
use super::KeyValueStore;
use crate::error::StorageError;

pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| StorageError::Database(sqlx::Error::Io(e)))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", path.display());
        log::info!("Opening favorites database at: {}", path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        sqlx::query("PRAGMA journal_mode=WAL;").execute(&pool).await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database; a single connection keeps it alive
    pub async fn in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: Pool<Sqlite>) -> Result<Self, StorageError> {
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

/// Run all pending migrations
async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), StorageError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let applied: bool =
        sqlx::query("SELECT COUNT(*) as count FROM _migrations WHERE name = 'migration_001'")
            .fetch_one(pool)
            .await
            .map(|row| row.get::<i64, _>("count") > 0)
            .unwrap_or(false);

    if applied {
        return Ok(());
    }

    log::info!("Applying migration_001...");
    for stmt in statements(MIGRATION_001) {
        sqlx::query(stmt)
            .execute(pool)
            .await
            .map_err(|source| StorageError::Migration {
                statement: stmt.to_string(),
                source,
            })?;
    }

    sqlx::query(
        "INSERT INTO _migrations (name, applied_at) VALUES ('migration_001', datetime('now'))",
    )
    .execute(pool)
    .await?;

    log::info!("Migration 001 applied successfully");
    Ok(())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"INSERT INTO settings (key, value, updated_at)
               VALUES (?, ?, datetime('now'))
               ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = datetime('now')"#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
