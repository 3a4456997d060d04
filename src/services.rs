//! Explicit bundle of the repositories screens depend on.

use std::sync::Arc;

use crate::catalog::{CatalogApi, HttpCatalog};
use crate::config::Config;
use crate::error::AppError;
use crate::store::{
    FavoritesRepository, LocalFavorites, LocalNotes, LocalSearchHistory, NotesRepository,
    SearchHistoryRepository,
};

/// Shared handles passed to screen reducers at construction.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogApi>,
    pub favorites: Arc<dyn FavoritesRepository>,
    pub notes: Arc<dyn NotesRepository>,
    pub history: Arc<dyn SearchHistoryRepository>,
}

impl Services {
    /// HTTP catalog plus file-backed stores under the configured data dir.
    pub fn open(config: &Config) -> Result<Self, AppError> {
        let data_dir = config.storage.resolve_data_dir();
        tracing::info!(data_dir = %data_dir.display(), base_url = %config.catalog.base_url, "Opening services");

        Ok(Self {
            catalog: Arc::new(HttpCatalog::new(&config.catalog)?),
            favorites: Arc::new(LocalFavorites::open(&data_dir)?),
            notes: Arc::new(LocalNotes::open(&data_dir)?),
            history: Arc::new(LocalSearchHistory::open(&data_dir)?),
        })
    }

    /// Given catalog plus empty in-memory stores.
    pub fn in_memory(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            catalog,
            favorites: Arc::new(LocalFavorites::in_memory()),
            notes: Arc::new(LocalNotes::in_memory()),
            history: Arc::new(LocalSearchHistory::in_memory()),
        }
    }
}
