use crate::catalog::TitleInfo;
use crate::mvi::UiState;
use crate::screens::{LoadStatus, Selection};
use crate::store::MovieNote;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovieState {
    pub movie_id: String,
    pub movie: Option<TitleInfo>,
    pub status: LoadStatus,
    /// `None` until the favorites table has been read.
    pub is_favorite: Option<bool>,
    /// Newest first.
    pub notes: Vec<MovieNote>,
    pub selected_notes: Selection<MovieNote>,
    pub editing: Option<MovieNote>,
}

impl MovieState {
    pub fn initial(movie_id: impl Into<String>) -> Self {
        Self {
            movie_id: movie_id.into(),
            status: LoadStatus::Loading,
            ..Self::default()
        }
    }
}

impl UiState for MovieState {}
