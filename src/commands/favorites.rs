//! Favorites commands
//!
//! This module handles:
//! - get_favorites: Favorite ids resolved against the loaded catalog
//! - add_favorite / remove_favorite / toggle_favorite
//! - clear_favorites: Bulk removal with a single write

use serde::Serialize;

use super::state::AppState;
use crate::countries::{favorite_countries, Country};

#[derive(Debug, Serialize)]
pub struct FavoritesView {
    /// Stored ids, in the order they were added
    pub ids: Vec<String>,
    /// Favorites found in the catalog, in catalog order
    pub countries: Vec<Country>,
}

pub async fn get_favorites(state: &AppState) -> Result<FavoritesView, String> {
    let ids = state.favorites.lock().await.favorites().to_vec();

    let catalog = state.catalog.read().await;
    if let Some(message) = catalog.error() {
        return Err(message.to_string());
    }
    let countries = favorite_countries(catalog.countries(), &ids)
        .into_iter()
        .cloned()
        .collect();

    Ok(FavoritesView { ids, countries })
}

pub async fn add_favorite(state: &AppState, id: &str) -> Result<(), String> {
    let mut favorites = state.favorites.lock().await;
    favorites.add(id).await.map_err(|e| e.to_string())
}

pub async fn remove_favorite(state: &AppState, id: &str) -> Result<(), String> {
    let mut favorites = state.favorites.lock().await;
    favorites.remove(id).await.map_err(|e| e.to_string())
}

/// Returns whether `id` is a favorite after the call
pub async fn toggle_favorite(state: &AppState, id: &str) -> Result<bool, String> {
    let mut favorites = state.favorites.lock().await;
    favorites.toggle(id).await.map_err(|e| e.to_string())
}

/// Returns how many favorites were removed
pub async fn clear_favorites(state: &AppState) -> Result<usize, String> {
    let mut favorites = state.favorites.lock().await;
    let removed = favorites.len();
    favorites.clear_all().await.map_err(|e| e.to_string())?;
    Ok(removed)
}
