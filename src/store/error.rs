use std::path::PathBuf;

use thiserror::Error;

use crate::error::ErrorKind;

/// Errors raised by the local stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode table '{table}': {source}")]
    Encode {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Entry '{key}' already exists")]
    Duplicate { key: String },

    #[error("Entry '{key}' not found")]
    NotFound { key: String },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Io { .. }
            | StoreError::Decode { .. }
            | StoreError::Encode { .. }
            | StoreError::Duplicate { .. } => ErrorKind::Storage,
        }
    }
}
