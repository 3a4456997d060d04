use crate::mvi::UiState;
use crate::screens::Selection;
use crate::store::Favorite;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FavoritesState {
    pub favorites: Vec<Favorite>,
    pub selected: Selection<Favorite>,
}

impl FavoritesState {
    pub fn is_selecting(&self) -> bool {
        !self.selected.is_empty()
    }
}

impl UiState for FavoritesState {}
