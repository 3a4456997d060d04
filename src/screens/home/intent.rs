use crate::mvi::{Intent, UiEvent};

#[derive(Debug, Clone)]
pub enum HomeIntent {
    /// First page plus the filter options.
    Load,
    LoadMore,
    /// Reloads from page 1, keeping the current list visible meanwhile.
    Refresh,
    SelectGenre(String),
    ClearGenre,
    SelectList(String),
    ClearList,
    /// Re-issues the page request that failed.
    Retry,
    OpenRandom,
}

impl Intent for HomeIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeEvent {
    ShowMessage(String),
    /// Navigate to the movie with this id.
    OpenMovie(String),
}

impl UiEvent for HomeEvent {}
