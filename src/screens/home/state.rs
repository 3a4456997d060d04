use crate::catalog::{TitleFilter, TitleInfo};
use crate::mvi::UiState;
use crate::screens::LoadStatus;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeState {
    pub movies: Vec<TitleInfo>,
    /// Last page appended to `movies`, 0 when nothing is loaded.
    pub loaded_page: u32,
    pub has_more: bool,
    pub status: LoadStatus,
    pub refreshing: bool,
    pub genres: Vec<String>,
    pub selected_genre: Option<String>,
    pub lists: Vec<String>,
    pub selected_list: Option<String>,
}

impl HomeState {
    pub fn filter(&self) -> TitleFilter {
        TitleFilter {
            genre: self.selected_genre.clone(),
            list: self.selected_list.clone(),
        }
    }
}

impl UiState for HomeState {}
