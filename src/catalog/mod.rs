//! Remote movie catalog.

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::HttpCatalog;
pub use error::CatalogError;
pub use types::{
    ImageCaption, ImageData, ReleaseDate, ReleaseYear, TitleFilter, TitleInfo, TitleText,
    TitleType, TitlesPage,
};

/// Read-only access to the movie catalog.
///
/// Every call reports failure through `Err`; callers decide whether to
/// degrade, retry or ignore.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Page `page` (1-based) of titles, optionally filtered.
    async fn titles(&self, page: u32, filter: &TitleFilter) -> Result<TitlesPage, CatalogError>;

    async fn title(&self, id: &str) -> Result<TitleInfo, CatalogError>;

    /// Genre names usable in [`TitleFilter::genre`].
    async fn genres(&self) -> Result<Vec<String>, CatalogError>;

    /// Named list ids usable in [`TitleFilter::list`].
    async fn lists(&self) -> Result<Vec<String>, CatalogError>;

    /// A random popular movie.
    async fn random_title(&self) -> Result<TitleInfo, CatalogError>;

    /// Page `page` (1-based) of keyword search results.
    async fn search(&self, keyword: &str, page: u32) -> Result<TitlesPage, CatalogError>;
}
