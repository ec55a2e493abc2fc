// Country data module
//
// Fetches the public country list once per session and keeps it in
// memory for the filter engine and the favorites views.

mod catalog;
mod client;
mod model;

pub use catalog::CountryCatalog;
pub use client::{decode_countries, CountriesClient, DEFAULT_API_URL};
pub use model::{favorite_countries, Country, CountryName, Flags};
