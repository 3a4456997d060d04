use crate::mvi::{Intent, UiEvent};
use crate::store::SearchHistoryItem;

#[derive(Debug, Clone)]
pub enum SearchIntent {
    LoadHistory,
    /// Runs a new search. A blank query behaves like [`SearchIntent::ClearQuery`].
    UpdateQuery(String),
    LoadMore,
    ClearQuery,
    RemoveHistoryItem(SearchHistoryItem),
    Retry,
}

impl Intent for SearchIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    ShowMessage(String),
}

impl UiEvent for SearchEvent {}
