use crate::catalog::TitleInfo;
use crate::mvi::UiState;
use crate::screens::LoadStatus;
use crate::store::SearchHistoryItem;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// Trimmed query the results belong to. Empty when idle.
    pub query: String,
    pub results: Vec<TitleInfo>,
    pub loaded_page: u32,
    pub has_more: bool,
    pub status: LoadStatus,
    /// Newest first.
    pub history: Vec<SearchHistoryItem>,
}

impl SearchState {
    /// True when a search ran and found nothing.
    pub fn is_empty_result(&self) -> bool {
        self.status == LoadStatus::Loaded && self.results.is_empty()
    }
}

impl UiState for SearchState {}
