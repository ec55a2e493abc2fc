// Country record as returned by the REST Countries API
//
// Only the projected fields are modelled:
// name, cca3, flags, region, population, capital

use serde::{Deserialize, Serialize};

/// Common and official names of a country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

/// Flag image locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: String,
    #[serde(default)]
    pub svg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// One entry of the fetched country list. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code, unique within one fetch
    #[serde(rename = "cca3")]
    pub id: String,
    pub name: CountryName,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub population: u64,
    #[serde(rename = "capital", default)]
    pub capitals: Vec<String>,
}

impl Country {
    pub fn flag_image_url(&self) -> &str {
        &self.flags.png
    }

    /// Alt text for the flag, falling back to a generated description
    pub fn flag_alt_text(&self) -> String {
        match self.flags.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => format!("Flag of {}", self.name.common),
        }
    }
}

/// Return the countries whose id is in `favorites`, in catalog order
pub fn favorite_countries<'a>(countries: &'a [Country], favorites: &[String]) -> Vec<&'a Country> {
    countries
        .iter()
        .filter(|c| favorites.iter().any(|id| *id == c.id))
        .collect()
}
