// In-memory country list and its load lifecycle
//
// The list is only ever replaced wholesale: readers see either nothing
// or the complete fetched list.

use chrono::{DateTime, Utc};

use super::model::Country;
use crate::error::FetchError;

/// Where the one-shot fetch currently stands
#[derive(Debug, Clone)]
enum LoadState {
    Loading,
    Loaded {
        countries: Vec<Country>,
        fetched_at: DateTime<Utc>,
    },
    Failed {
        message: String,
    },
}

/// Process-wide country list
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    state: LoadState,
}

impl Default for CountryCatalog {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }
}

impl CountryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the outcome of a fetch in one assignment
    pub fn apply(&mut self, result: Result<Vec<Country>, FetchError>) {
        self.state = match result {
            Ok(countries) => LoadState::Loaded {
                countries,
                fetched_at: Utc::now(),
            },
            Err(e) => {
                log::error!("Error fetching countries: {}", e);
                LoadState::Failed {
                    message: e.to_string(),
                }
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// The loaded list, empty while loading or after a failure
    pub fn countries(&self) -> &[Country] {
        match &self.state {
            LoadState::Loaded { countries, .. } => countries,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            LoadState::Loaded { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }

    pub fn total(&self) -> usize {
        self.countries().len()
    }

    pub fn find(&self, id: &str) -> Option<&Country> {
        self.countries().iter().find(|c| c.id.eq_ignore_ascii_case(id))
    }
}
