//! Application State
//!
//! Shared state accessible to all command handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::countries::{CountriesClient, CountryCatalog};
use crate::favorites::SharedFavorites;

/// Application state holding the country list, favorites and the API client
pub struct AppState {
    pub catalog: Arc<RwLock<CountryCatalog>>,
    pub favorites: SharedFavorites,
    pub client: Arc<CountriesClient>,
}

impl AppState {
    pub fn new(client: CountriesClient, favorites: SharedFavorites) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(CountryCatalog::new())),
            favorites,
            client: Arc::new(client),
        }
    }
}
