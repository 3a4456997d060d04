use crate::mvi::{Intent, UiEvent};
use crate::store::Favorite;

#[derive(Debug, Clone)]
pub enum FavoritesIntent {
    /// Start mirroring the favorites table into state.
    LoadFavorites,
    SwitchSelection(Favorite),
    ClearSelection,
    /// Delete every selected favorite.
    RemoveSelected,
}

impl Intent for FavoritesIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesEvent {
    ShowMessage(String),
}

impl UiEvent for FavoritesEvent {}
