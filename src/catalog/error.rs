use thiserror::Error;

use crate::error::ErrorKind;

/// Errors returned by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Catalog returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response from '{endpoint}': {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Title '{id}' not found")]
    NotFound { id: String },

    #[error("Catalog returned no results for '{endpoint}'")]
    EmptyResult { endpoint: String },
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidUrl(_)
            | CatalogError::InvalidHeader(_)
            | CatalogError::Client(_) => ErrorKind::Config,
            CatalogError::Timeout { .. } => ErrorKind::Timeout,
            CatalogError::Connection(_) => ErrorKind::Network,
            CatalogError::Status { status: 404, .. } => ErrorKind::NotFound,
            CatalogError::Status { .. } => ErrorKind::Server,
            CatalogError::Decode { .. } => ErrorKind::Data,
            CatalogError::NotFound { .. } | CatalogError::EmptyResult { .. } => {
                ErrorKind::NotFound
            }
        }
    }

    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Timeout { .. } | CatalogError::Connection(_) => true,
            CatalogError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
