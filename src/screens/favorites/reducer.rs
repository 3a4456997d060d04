use std::sync::Arc;

use async_trait::async_trait;

use super::intent::{FavoritesEvent, FavoritesIntent};
use super::state::FavoritesState;
use crate::error::AppError;
use crate::mvi::{Reducer, Scope};
use crate::screens::remove_all;
use crate::store::FavoritesRepository;

pub struct FavoritesReducer {
    favorites: Arc<dyn FavoritesRepository>,
}

impl FavoritesReducer {
    pub fn new(favorites: Arc<dyn FavoritesRepository>) -> Self {
        Self { favorites }
    }
}

#[async_trait]
impl Reducer for FavoritesReducer {
    type State = FavoritesState;
    type Intent = FavoritesIntent;
    type Event = FavoritesEvent;

    fn name(&self) -> &'static str {
        "favorites"
    }

    async fn reduce(&self, intent: FavoritesIntent, scope: &Scope<Self>) -> Result<(), AppError> {
        match intent {
            FavoritesIntent::LoadFavorites => {
                scope.collect("favorites", self.favorites.all(), |mut state, favorites| {
                    // Entries deleted elsewhere drop out of the selection.
                    state
                        .selected
                        .retain(|picked| favorites.iter().any(|f| f.movie_id == picked.movie_id));
                    state.favorites = favorites;
                    state
                });
            }
            FavoritesIntent::SwitchSelection(favorite) => {
                scope.state(|mut state| {
                    state.selected.toggle(favorite);
                    state
                });
            }
            FavoritesIntent::ClearSelection => {
                scope.state(|mut state| {
                    state.selected.clear();
                    state
                });
            }
            FavoritesIntent::RemoveSelected => {
                let doomed = scope.modify(|mut state| {
                    let taken = state.selected.take();
                    (state, taken)
                });
                if doomed.is_empty() {
                    return Ok(());
                }
                tracing::debug!(count = doomed.len(), "Removing selected favorites");
                let repository = Arc::clone(&self.favorites);
                scope.launch(async move {
                    remove_all(doomed, |favorite| {
                        let repository = Arc::clone(&repository);
                        async move { repository.delete(&favorite).await }
                    })
                    .await
                });
            }
        }
        Ok(())
    }

    fn on_subscribe(&self, scope: &Scope<Self>) {
        scope.intent(FavoritesIntent::LoadFavorites);
    }

    fn on_error(&self, error: AppError, scope: &Scope<Self>) {
        tracing::warn!(screen = self.name(), kind = ?error.kind(), error = %error, "Favorites action failed");
        scope.emit(FavoritesEvent::ShowMessage(error.user_message()));
    }
}
