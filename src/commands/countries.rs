//! Country list commands
//!
//! This module handles:
//! - load_countries: One-shot fetch that fills the catalog
//! - list_countries: Filtered view plus shown/total counts
//! - get_regions: Region facet for the filter picker
//! - get_country: Detail view for a single country

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format_utils::format_population;
use super::state::AppState;
use crate::countries::{Country, CountryCatalog};
use crate::filter::{distinct_regions, filter_countries, FilterSpec};

// ============================================================================
// Data Types
// ============================================================================

/// Result of applying a filter to the catalog
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPage {
    pub countries: Vec<Country>,
    pub shown: usize,
    pub total: usize,
    /// The filter that produced this page
    pub filter: FilterSpec,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Everything the detail view shows for one country
#[derive(Debug, Serialize)]
pub struct CountryDetails {
    pub id: String,
    pub common_name: String,
    pub official_name: String,
    pub flag_url: String,
    pub flag_alt: String,
    pub region: String,
    pub population: String,
    pub capitals: Vec<String>,
    pub is_favorite: bool,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Fail while the list is loading or after a failed fetch
fn ready(catalog: &CountryCatalog) -> Result<&[Country], String> {
    if catalog.is_loading() {
        return Err("Countries are still loading".to_string());
    }
    if let Some(message) = catalog.error() {
        return Err(message.to_string());
    }
    Ok(catalog.countries())
}

// ============================================================================
// Country Commands
// ============================================================================

/// Fetch the country list and swap it into the catalog.
/// Returns the number of countries loaded.
pub async fn load_countries(state: &AppState) -> Result<usize, String> {
    let result = state.client.fetch_all().await;

    let mut catalog = state.catalog.write().await;
    catalog.apply(result);
    match catalog.error() {
        Some(message) => Err(message.to_string()),
        None => Ok(catalog.total()),
    }
}

pub async fn list_countries(state: &AppState, filter: &FilterSpec) -> Result<CountryPage, String> {
    let catalog = state.catalog.read().await;
    let countries = ready(&catalog)?;

    let matched: Vec<Country> = filter_countries(countries, filter)
        .into_iter()
        .cloned()
        .collect();

    log::debug!("Filter {:?} matched {} of {}", filter, matched.len(), countries.len());

    Ok(CountryPage {
        shown: matched.len(),
        total: countries.len(),
        countries: matched,
        filter: filter.clone(),
        fetched_at: catalog.fetched_at(),
    })
}

pub async fn get_regions(state: &AppState) -> Result<Vec<String>, String> {
    let catalog = state.catalog.read().await;
    Ok(distinct_regions(ready(&catalog)?))
}

pub async fn get_country(state: &AppState, id: &str) -> Result<CountryDetails, String> {
    let catalog = state.catalog.read().await;
    ready(&catalog)?;

    let country = catalog
        .find(id)
        .ok_or_else(|| format!("Unknown country: {}", id))?;
    let is_favorite = state.favorites.lock().await.is_favorite(&country.id);

    Ok(CountryDetails {
        id: country.id.clone(),
        common_name: country.name.common.clone(),
        official_name: country.name.official.clone(),
        flag_url: country.flag_image_url().to_string(),
        flag_alt: country.flag_alt_text(),
        region: country.region.clone(),
        population: format_population(country.population),
        capitals: country.capitals.clone(),
        is_favorite,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::state::test_support::{country, loaded_state};

    fn sample() -> Vec<Country> {
        vec![
            country("FRA", "France", "Europe", 67_000_000),
            country("USA", "United States", "Americas", 331_000_000),
            country("PER", "Peru", "Americas", 33_000_000),
        ]
    }

    #[tokio::test]
    async fn test_list_countries_counts() {
        let state = loaded_state(sample()).await;
        let filter = FilterSpec {
            region: "Americas".to_string(),
            ..Default::default()
        };

        let page = list_countries(&state, &filter).await.unwrap();
        assert_eq!(page.shown, 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.countries[0].id, "USA");
        assert_eq!(page.filter, filter);
        assert_eq!(page.filter.to_query(), "region=Americas");
        assert!(page.fetched_at.is_some());
    }

    #[tokio::test]
    async fn test_country_page_json_shape() {
        let state = loaded_state(sample()).await;
        let filter = FilterSpec::from_query("minPopulation=50000000");

        let page = list_countries(&state, &filter).await.unwrap();
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["shown"], 2);
        assert_eq!(json["filter"]["minPopulation"], 50_000_000);
        assert_eq!(json["filter"]["maxPopulation"], 0);
        assert_eq!(json["filter"]["search"], "");
        assert!(json["fetchedAt"].is_string());
        assert_eq!(json["countries"][0]["cca3"], "FRA");
    }

    #[tokio::test]
    async fn test_get_regions() {
        let state = loaded_state(sample()).await;
        assert_eq!(get_regions(&state).await.unwrap(), vec!["Americas", "Europe"]);
    }

    #[tokio::test]
    async fn test_get_country_details() {
        let state = loaded_state(sample()).await;
        state.favorites.lock().await.add("PER").await.unwrap();

        let details = get_country(&state, "per").await.unwrap();
        assert_eq!(details.id, "PER");
        assert_eq!(details.official_name, "Republic of Peru");
        assert_eq!(details.population, "33.000.000");
        assert_eq!(details.flag_alt, "Flag of Peru");
        assert!(details.is_favorite);

        assert!(get_country(&state, "XXX").await.is_err());
    }

    #[tokio::test]
    async fn test_commands_fail_while_loading() {
        let state = loaded_state(Vec::new()).await;
        *state.catalog.write().await = CountryCatalog::new();

        let err = list_countries(&state, &FilterSpec::default()).await.unwrap_err();
        assert_eq!(err, "Countries are still loading");
    }

    #[tokio::test]
    async fn test_failed_fetch_surfaces_message() {
        let state = loaded_state(sample()).await;

        // Nothing listens on the discard port
        let err = load_countries(&state).await.unwrap_err();
        assert!(err.starts_with("Network error"), "{}", err);

        let catalog = state.catalog.read().await;
        assert!(catalog.countries().is_empty());
        drop(catalog);

        assert_eq!(get_regions(&state).await.unwrap_err(), err);
    }
}
