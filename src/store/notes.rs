use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::now_millis;
use super::table::{Record, Rows, Table};
use crate::live::{derive, Live};

/// Free-text note attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieNote {
    pub id: String,
    pub movie_id: String,
    pub text: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl MovieNote {
    /// New note with a fresh id, stamped now.
    pub fn new(movie_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            movie_id: movie_id.into(),
            text: text.into(),
            created_at: now_millis(),
        }
    }
}

impl Record for MovieNote {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

#[async_trait]
pub trait NotesRepository: Send + Sync {
    /// Every note, newest first.
    fn all(&self) -> Live<Vec<MovieNote>>;

    /// Notes of one movie, newest first.
    fn by_movie(&self, movie_id: &str) -> Live<Vec<MovieNote>>;

    fn by_id(&self, id: &str) -> Live<Option<MovieNote>>;

    async fn insert(&self, item: MovieNote) -> Result<(), StoreError>;

    async fn update(&self, item: MovieNote) -> Result<(), StoreError>;

    async fn delete(&self, item: &MovieNote) -> Result<(), StoreError>;
}

/// Notes kept in a local [`Table`].
pub struct LocalNotes {
    table: Table<MovieNote>,
}

impl LocalNotes {
    pub const FILE_NAME: &'static str = "movie_notes.json";

    pub fn in_memory() -> Self {
        Self {
            table: Table::in_memory("movie_notes"),
        }
    }

    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            table: Table::open("movie_notes", data_dir.join(Self::FILE_NAME))?,
        })
    }
}

fn newest_first<'a>(notes: impl Iterator<Item = &'a MovieNote>) -> Vec<MovieNote> {
    let mut notes: Vec<MovieNote> = notes.cloned().collect();
    notes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    notes
}

#[async_trait]
impl NotesRepository for LocalNotes {
    fn all(&self) -> Live<Vec<MovieNote>> {
        derive(self.table.watch(), |rows: &Rows<MovieNote>| newest_first(rows.iter()))
    }

    fn by_movie(&self, movie_id: &str) -> Live<Vec<MovieNote>> {
        let movie_id = movie_id.to_string();
        derive(self.table.watch(), move |rows: &Rows<MovieNote>| {
            newest_first(rows.iter().filter(|n| n.movie_id == movie_id))
        })
    }

    fn by_id(&self, id: &str) -> Live<Option<MovieNote>> {
        let id = id.to_string();
        derive(self.table.watch(), move |rows: &Rows<MovieNote>| {
            rows.iter().find(|n| n.id == id).cloned()
        })
    }

    async fn insert(&self, item: MovieNote) -> Result<(), StoreError> {
        self.table.insert(item)
    }

    async fn update(&self, item: MovieNote) -> Result<(), StoreError> {
        self.table.update(item)
    }

    async fn delete(&self, item: &MovieNote) -> Result<(), StoreError> {
        self.table.delete(&item.id)
    }
}
