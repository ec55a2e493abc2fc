// Application configuration
//
// Sources, highest priority first: CLI flag > environment variable >
// country-explorer.toml > built-in default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::countries::DEFAULT_API_URL;

pub const DEFAULT_CONFIG_PATH: &str = "country-explorer.toml";
pub const ENV_API_URL: &str = "COUNTRY_EXPLORER_API_URL";
pub const ENV_DATABASE: &str = "COUNTRY_EXPLORER_DB";

const DEFAULT_DATABASE_PATH: &str = "country-explorer.db";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of country-explorer.toml; every field optional
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub database_path: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub database_path: PathBuf,
    pub timeout: Duration,
}

/// Overrides coming from the command line
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub database_path: Option<PathBuf>,
}

/// Load the config file. Missing or malformed files fall back to defaults.
pub fn load_file_config(path: &Path) -> FileConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => {
            log::debug!("No config file at {}, using defaults", path.display());
            return FileConfig::default();
        }
    };
    parse_file_config(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed config {}: {}", path.display(), e);
        FileConfig::default()
    })
}

pub fn parse_file_config(content: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(content)
}

impl AppConfig {
    /// Resolve settings from all sources, reading the process environment
    pub fn resolve(cli: &CliOverrides, file: &FileConfig) -> Self {
        Self::resolve_with_env(cli, file, |key| std::env::var(key).ok())
    }

    pub fn resolve_with_env<F>(cli: &CliOverrides, file: &FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = cli
            .api_url
            .clone()
            .or_else(|| env(ENV_API_URL))
            .or_else(|| file.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let database_path = cli
            .database_path
            .clone()
            .or_else(|| env(ENV_DATABASE).map(PathBuf::from))
            .or_else(|| file.database_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let timeout = Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        Self {
            api_url,
            database_path,
            timeout,
        }
    }
}
