//! Favorites store
//!
//! Ordered set of country ids the user bookmarked. The in-memory set is
//! the source of truth for the session; every change is written back as a
//! full JSON snapshot under a single storage key.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key holding the JSON array of ids
pub const FAVORITES_KEY: &str = "countries-favorites";

/// Handle shared by every consumer for the whole session
pub type SharedFavorites = Arc<Mutex<FavoritesStore>>;

pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    favorites: Vec<String>,
}

impl FavoritesStore {
    /// Load the persisted set. Read or parse failures start from empty.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let favorites = match storage.get(FAVORITES_KEY).await {
            Ok(Some(raw)) => parse_favorites(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Error loading favorites from storage: {}", e);
                Vec::new()
            }
        };
        log::debug!("Loaded {} favorites", favorites.len());

        Self { storage, favorites }
    }

    /// Wrap the store in the shared handle
    pub fn into_shared(self) -> SharedFavorites {
        Arc::new(Mutex::new(self))
    }

    /// Ids in insertion order
    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    /// Append `id` unless already present
    pub async fn add(&mut self, id: &str) -> Result<(), StorageError> {
        if self.is_favorite(id) {
            return Ok(());
        }
        self.favorites.push(id.to_string());
        log::info!("Added {} to favorites", id);
        self.persist().await
    }

    /// Remove `id` if present
    pub async fn remove(&mut self, id: &str) -> Result<(), StorageError> {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != id);
        if self.favorites.len() == before {
            return Ok(());
        }
        log::info!("Removed {} from favorites", id);
        self.persist().await
    }

    /// Flip membership of `id`; returns whether it is now a favorite
    pub async fn toggle(&mut self, id: &str) -> Result<bool, StorageError> {
        if self.is_favorite(id) {
            self.remove(id).await?;
            Ok(false)
        } else {
            self.add(id).await?;
            Ok(true)
        }
    }

    /// Drop every favorite with a single write
    pub async fn clear_all(&mut self) -> Result<(), StorageError> {
        log::info!("Clearing {} favorites", self.favorites.len());
        self.favorites.clear();
        self.persist().await
    }

    async fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.favorites)?;
        self.storage.set(FAVORITES_KEY, &json).await
    }
}

/// Decode a stored snapshot, dropping duplicates. Malformed input is empty.
fn parse_favorites(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(ids) => {
            let mut unique: Vec<String> = Vec::with_capacity(ids.len());
            for id in ids {
                if !unique.contains(&id) {
                    unique.push(id);
                }
            }
            unique
        }
        Err(e) => {
            log::warn!("Error loading favorites from storage: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SqliteStore};
    use async_trait::async_trait;

    /// Storage whose reads always fail
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Database(sqlx::Error::PoolClosed))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Database(sqlx::Error::PoolClosed))
        }
    }

    async fn persisted(storage: &MemoryStore) -> Option<String> {
        storage.get(FAVORITES_KEY).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_persists_without_duplicates() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = FavoritesStore::load(storage.clone()).await;
        assert!(store.is_empty());

        store.add("FRA").await.unwrap();
        assert!(store.is_favorite("FRA"));
        assert_eq!(persisted(&storage).await, Some(r#"["FRA"]"#.to_string()));

        store.add("FRA").await.unwrap();
        assert_eq!(store.favorites(), ["FRA".to_string()]);
        assert_eq!(persisted(&storage).await, Some(r#"["FRA"]"#.to_string()));
    }

    #[tokio::test]
    async fn test_invalid_json_starts_empty() {
        let storage = Arc::new(MemoryStore::with_value(FAVORITES_KEY, "{not json"));
        let store = FavoritesStore::load(storage).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_starts_empty() {
        let store = FavoritesStore::load(Arc::new(BrokenStore)).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let mut store = FavoritesStore::load(Arc::new(BrokenStore)).await;
        assert!(store.add("FRA").await.is_err());
        // In-memory state already reflects the change
        assert!(store.is_favorite("FRA"));
    }

    #[tokio::test]
    async fn test_loads_existing_snapshot_in_order() {
        let storage = Arc::new(MemoryStore::with_value(FAVORITES_KEY, r#"["PER","FRA","PER"]"#));
        let store = FavoritesStore::load(storage).await;
        assert_eq!(store.favorites(), ["PER".to_string(), "FRA".to_string()]);
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = FavoritesStore::load(storage.clone()).await;

        store.add("JPN").await.unwrap();
        store.remove("JPN").await.unwrap();
        assert!(!store.is_favorite("JPN"));
        assert_eq!(persisted(&storage).await, Some("[]".to_string()));

        // Removing an absent id is a no-op
        let writes = storage.write_count();
        store.remove("JPN").await.unwrap();
        assert_eq!(storage.write_count(), writes);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_membership() {
        let storage = Arc::new(MemoryStore::with_value(FAVORITES_KEY, r#"["DEU"]"#));
        let mut store = FavoritesStore::load(storage).await;

        assert!(store.toggle("FRA").await.unwrap());
        assert!(!store.toggle("FRA").await.unwrap());
        assert!(!store.is_favorite("FRA"));

        assert!(!store.toggle("DEU").await.unwrap());
        assert!(store.toggle("DEU").await.unwrap());
        assert!(store.is_favorite("DEU"));
    }

    #[tokio::test]
    async fn test_membership_independent_of_call_count() {
        let mut store = FavoritesStore::load(Arc::new(MemoryStore::new())).await;
        for _ in 0..3 {
            store.add("ITA").await.unwrap();
        }
        store.remove("ITA").await.unwrap();
        assert!(!store.is_favorite("ITA"));

        store.remove("ITA").await.unwrap();
        store.add("ITA").await.unwrap();
        assert!(store.is_favorite("ITA"));
    }

    #[tokio::test]
    async fn test_clear_all_writes_once() {
        let storage = Arc::new(MemoryStore::with_value(
            FAVORITES_KEY,
            r#"["FRA","DEU","PER","JPN"]"#,
        ));
        let mut store = FavoritesStore::load(storage.clone()).await;
        assert_eq!(store.len(), 4);

        store.clear_all().await.unwrap();
        assert!(store.is_empty());
        assert_eq!(storage.write_count(), 1);
        assert_eq!(persisted(&storage).await, Some("[]".to_string()));
    }

    #[tokio::test]
    async fn test_survives_reload_from_sqlite() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::in_memory().await.unwrap());

        let mut store = FavoritesStore::load(storage.clone()).await;
        store.add("NZL").await.unwrap();
        store.add("CAN").await.unwrap();
        drop(store);

        let reloaded = FavoritesStore::load(storage).await;
        assert_eq!(reloaded.favorites(), ["NZL".to_string(), "CAN".to_string()]);
    }

    #[tokio::test]
    async fn test_shared_handle() {
        let shared = FavoritesStore::load(Arc::new(MemoryStore::new()))
            .await
            .into_shared();
        let other = shared.clone();

        shared.lock().await.add("ESP").await.unwrap();
        assert!(other.lock().await.is_favorite("ESP"));
    }
}
