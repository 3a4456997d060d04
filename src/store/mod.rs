//! Local persistent stores.
//!
//! Each store is a repository trait plus a [`Table`]-backed implementation.
//! Reads are [`Live`](crate::live::Live) queries that re-emit when the
//! table changes.

mod error;
mod favorites;
mod history;
mod notes;
mod table;

use std::time::{SystemTime, UNIX_EPOCH};

pub use error::StoreError;
pub use favorites::{Favorite, FavoritesRepository, LocalFavorites};
pub use history::{LocalSearchHistory, SearchHistoryItem, SearchHistoryRepository};
pub use notes::{LocalNotes, MovieNote, NotesRepository};
pub use table::{Record, Rows, Table};

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
