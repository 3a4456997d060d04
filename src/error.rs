//! Crate-level error and its user-facing classification.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::store::StoreError;

/// Any failure a reducer can run into.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An intent arrived that the current state cannot serve.
    #[error("{0}")]
    Unavailable(String),
}

/// Coarse error class shown to users instead of diagnostic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Timeout,
    Server,
    Data,
    Storage,
    Config,
    NotFound,
}

impl ErrorKind {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network => "Could not reach the movie service. Check your connection.",
            Self::Timeout => "The movie service took too long to answer.",
            Self::Server => "The movie service returned an error.",
            Self::Data => "The movie service sent data we could not read.",
            Self::Storage => "Could not access saved data on this device.",
            Self::Config => "The application is not configured correctly.",
            Self::NotFound => "Nothing was found.",
        }
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Catalog(err) => err.kind(),
            AppError::Store(err) => err.kind(),
            AppError::Config(_) => ErrorKind::Config,
            AppError::Unavailable(_) => ErrorKind::NotFound,
        }
    }

    /// Text safe to show on screen.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unavailable(message) => message.clone(),
            other => other.kind().user_message().to_string(),
        }
    }
}

/// Structured failure kept in screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&AppError> for ScreenError {
    fn from(err: &AppError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

impl From<AppError> for ScreenError {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}
