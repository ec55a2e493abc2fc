//! Command Handlers
//!
//! Entry points the front-end calls. Each returns `Result<T, String>` so
//! failures can be shown to the user as-is.
//!
//! ## Module Organization
//! - `state` - Application state shared by all handlers
//! - `format_utils` - Display formatting helpers
//! - `countries` - Fetch, filter and detail commands
//! - `favorites` - Favorites list commands

mod state;
pub mod countries;
pub mod favorites;
pub mod format_utils;

// Re-export AppState for use in main.rs
pub use state::AppState;
