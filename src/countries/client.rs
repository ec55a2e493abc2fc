// REST Countries API client
// One GET with a fixed field projection; no auth, no paging, no retry.
// See: https://restcountries.com/

use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::model::Country;
use crate::error::FetchError;

/// Default endpoint with the field projection the app needs
pub const DEFAULT_API_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,cca3,flags,region,population,capital";

/// HTTP client for the country list endpoint
pub struct CountriesClient {
    http: Client,
    url: String,
}

impl CountriesClient {
    /// Create a client for `url` with a request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("country-explorer/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full country list
    pub async fn fetch_all(&self) -> Result<Vec<Country>, FetchError> {
        log::info!("Fetching countries from {}", self.url);

        let response = self.http.get(&self.url).send().await?;
        check_status(response.status())?;

        let body = response.text().await?;
        let countries = decode_countries(&body)?;

        log::info!("Fetched {} countries", countries.len());
        Ok(countries)
    }
}

/// Map a non-2xx status to a fetch error
fn check_status(status: StatusCode) -> Result<(), FetchError> {
    if status.is_success() {
        return Ok(());
    }
    Err(FetchError::Status {
        code: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}

/// Decode the JSON array body
pub fn decode_countries(body: &str) -> Result<Vec<Country>, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}
