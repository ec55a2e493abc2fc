//! Country filter engine
//!
//! Pure functions over the fetched country list:
//! - `filter_countries`: stable subset matching every active clause
//! - `distinct_regions`: sorted, de-duplicated region facet
//!
//! Sentinels: an empty string or a population bound of `0` means the
//! clause is not set.

mod query;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::countries::Country;

/// User-chosen constraints applied to the country list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring of the common or official name
    pub search: String,
    /// Exact region name
    pub region: String,
    /// Inclusive lower bound, `0` = unbounded
    pub min_population: u64,
    /// Inclusive upper bound, `0` = unbounded
    pub max_population: u64,
}

impl FilterSpec {
    /// The all-sentinel spec
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || !self.region.is_empty()
            || self.min_population > 0
            || self.max_population > 0
    }

    /// Whether `country` satisfies every active clause
    pub fn matches(&self, country: &Country) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let name_match = country.name.common.to_lowercase().contains(&needle)
                || country.name.official.to_lowercase().contains(&needle);
            if !name_match {
                return false;
            }
        }

        if !self.region.is_empty() && country.region != self.region {
            return false;
        }

        if self.min_population > 0 && country.population < self.min_population {
            return false;
        }

        if self.max_population > 0 && country.population > self.max_population {
            return false;
        }

        true
    }
}

/// Return the countries matching `spec`, preserving input order
pub fn filter_countries<'a>(countries: &'a [Country], spec: &FilterSpec) -> Vec<&'a Country> {
    if !spec.has_active_filters() {
        return countries.iter().collect();
    }
    countries.iter().filter(|c| spec.matches(c)).collect()
}

/// Distinct region values in ascending lexicographic order
pub fn distinct_regions(countries: &[Country]) -> Vec<String> {
    countries
        .iter()
        .map(|c| c.region.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
