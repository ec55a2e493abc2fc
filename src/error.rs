// Error types shared by the data source and the persistence layer
//
// Fetch errors are the only failures that reach the user. Storage errors
// on read are swallowed by the favorites store; write errors bubble up.

use thiserror::Error;

/// Failure while fetching the country list
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, timeout)
    #[error("Network error: {0}")]
    Network(String),
    /// The API answered with a non-2xx status
    #[error("Error {code}: {reason}")]
    Status { code: u16, reason: String },
    /// The body was not the expected JSON array
    #[error("Failed to decode country list: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Failure in the key-value persistence layer
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Migration failed on statement: {statement}\nError: {source}")]
    Migration {
        statement: String,
        #[source]
        source: sqlx::Error,
    },
}
