use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::table::{Record, Table};
use crate::live::{derive, Live};

/// A movie marked as favorite. One entry per movie id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub movie_id: String,
    pub title: String,
    pub image_url: String,
}

impl Record for Favorite {
    type Key = String;

    fn key(&self) -> String {
        self.movie_id.clone()
    }
}

#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// All favorites ordered by movie id.
    fn all(&self) -> Live<Vec<Favorite>>;

    /// The favorite for `movie_id`, `None` while there is none.
    fn by_movie(&self, movie_id: &str) -> Live<Option<Favorite>>;

    async fn insert(&self, item: Favorite) -> Result<(), StoreError>;

    async fn update(&self, item: Favorite) -> Result<(), StoreError>;

    async fn delete(&self, item: &Favorite) -> Result<(), StoreError>;
}

/// Favorites kept in a local [`Table`].
pub struct LocalFavorites {
    table: Table<Favorite>,
}

impl LocalFavorites {
    pub const FILE_NAME: &'static str = "favorites.json";

    pub fn in_memory() -> Self {
        Self {
            table: Table::in_memory("favorites"),
        }
    }

    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            table: Table::open("favorites", data_dir.join(Self::FILE_NAME))?,
        })
    }
}

#[async_trait]
impl FavoritesRepository for LocalFavorites {
    fn all(&self) -> Live<Vec<Favorite>> {
        derive(self.table.watch(), |rows| rows.to_vec())
    }

    fn by_movie(&self, movie_id: &str) -> Live<Option<Favorite>> {
        let movie_id = movie_id.to_string();
        derive(self.table.watch(), move |rows| {
            rows.iter().find(|f| f.movie_id == movie_id).cloned()
        })
    }

    async fn insert(&self, item: Favorite) -> Result<(), StoreError> {
        self.table.insert(item)
    }

    async fn update(&self, item: Favorite) -> Result<(), StoreError> {
        self.table.update(item)
    }

    async fn delete(&self, item: &Favorite) -> Result<(), StoreError> {
        self.table.delete(&item.movie_id)
    }
}
