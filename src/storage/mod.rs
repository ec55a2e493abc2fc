pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StorageError;

/// String key-value persistence. Writes overwrite any prior value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`, `None` if never written
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
