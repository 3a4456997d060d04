use std::sync::Arc;

use async_trait::async_trait;

use super::intent::{MovieEvent, MovieIntent};
use super::state::MovieState;
use crate::catalog::CatalogApi;
use crate::error::{AppError, ScreenError};
use crate::mvi::{Reducer, Scope};
use crate::screens::{remove_all, LoadStatus};
use crate::store::{Favorite, FavoritesRepository, MovieNote, NotesRepository};

pub struct MovieReducer {
    movie_id: String,
    catalog: Arc<dyn CatalogApi>,
    favorites: Arc<dyn FavoritesRepository>,
    notes: Arc<dyn NotesRepository>,
}

impl MovieReducer {
    pub fn new(
        movie_id: impl Into<String>,
        catalog: Arc<dyn CatalogApi>,
        favorites: Arc<dyn FavoritesRepository>,
        notes: Arc<dyn NotesRepository>,
    ) -> Self {
        Self {
            movie_id: movie_id.into(),
            catalog,
            favorites,
            notes,
        }
    }

    async fn load_details(&self, scope: &Scope<Self>) {
        scope.state(|state| MovieState {
            status: LoadStatus::Loading,
            ..state
        });

        match self.catalog.title(&self.movie_id).await {
            Ok(movie) => scope.state(|state| MovieState {
                movie: Some(movie),
                status: LoadStatus::Loaded,
                ..state
            }),
            Err(err) => {
                let err = AppError::from(err);
                tracing::warn!(movie_id = %self.movie_id, error = %err, "Failed to load movie");
                scope.state(|state| MovieState {
                    status: LoadStatus::Failed(ScreenError::from(&err)),
                    ..state
                });
            }
        }
    }

    async fn toggle_favorite(&self, scope: &Scope<Self>) -> Result<(), AppError> {
        let Some(movie) = scope.current().movie else {
            return Err(AppError::Unavailable(
                "Movie details are still loading".to_string(),
            ));
        };

        let is_favorite = match self.favorites.by_movie(&self.movie_id).get() {
            Some(existing) => {
                self.favorites.delete(&existing).await?;
                false
            }
            None => {
                self.favorites
                    .insert(Favorite {
                        movie_id: self.movie_id.clone(),
                        title: movie.display_title().to_string(),
                        image_url: movie.image_url().unwrap_or_default().to_string(),
                    })
                    .await?;
                true
            }
        };

        tracing::debug!(movie_id = %self.movie_id, is_favorite, "Favorite toggled");
        scope.state(|state| MovieState {
            is_favorite: Some(is_favorite),
            ..state
        });
        Ok(())
    }
}

#[async_trait]
impl Reducer for MovieReducer {
    type State = MovieState;
    type Intent = MovieIntent;
    type Event = MovieEvent;

    fn name(&self) -> &'static str {
        "movie"
    }

    async fn reduce(&self, intent: MovieIntent, scope: &Scope<Self>) -> Result<(), AppError> {
        match intent {
            MovieIntent::LoadMovieData | MovieIntent::Retry => self.load_details(scope).await,
            MovieIntent::LoadFavoriteStatus => {
                let favorite = self.favorites.by_movie(&self.movie_id);
                scope.collect("favorite", favorite, |state, favorite| MovieState {
                    is_favorite: Some(favorite.is_some()),
                    ..state
                });
            }
            MovieIntent::LoadNotes => {
                let notes = self.notes.by_movie(&self.movie_id);
                scope.collect("notes", notes, |mut state, notes| {
                    let exists = |note: &MovieNote| notes.iter().any(|n| n.id == note.id);
                    state.selected_notes.retain(|n| exists(n));
                    if state.editing.as_ref().is_some_and(|n| !exists(n)) {
                        state.editing = None;
                    }
                    state.notes = notes;
                    state
                });
            }
            MovieIntent::ToggleFavorite => self.toggle_favorite(scope).await?,
            MovieIntent::AddNote(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(AppError::Unavailable("A note cannot be empty".to_string()));
                }
                self.notes.insert(MovieNote::new(&self.movie_id, text)).await?;
            }
            MovieIntent::RemoveNote(note) => {
                self.notes.delete(&note).await?;
            }
            MovieIntent::SwitchNoteSelection(note) => {
                scope.state(|mut state| {
                    state.selected_notes.toggle(note);
                    state
                });
            }
            MovieIntent::ClearSelectedNotes => {
                scope.state(|mut state| {
                    state.selected_notes.clear();
                    state
                });
            }
            MovieIntent::DeleteSelectedNotes => {
                let doomed = scope.modify(|mut state| {
                    let taken = state.selected_notes.take();
                    (state, taken)
                });
                if !doomed.is_empty() {
                    let notes = Arc::clone(&self.notes);
                    scope.launch(async move {
                        remove_all(doomed, |note| {
                            let notes = Arc::clone(&notes);
                            async move { notes.delete(&note).await }
                        })
                        .await
                    });
                }
            }
            MovieIntent::SelectNoteForEditing(note) => {
                scope.state(|state| MovieState {
                    editing: Some(note),
                    ..state
                });
            }
            MovieIntent::SaveNoteEdits(text) => {
                let editing = scope.modify(|mut state| {
                    let editing = state.editing.take();
                    (state, editing)
                });
                let Some(note) = editing else {
                    return Ok(());
                };
                let text = text.trim();
                if text.is_empty() {
                    return Err(AppError::Unavailable("A note cannot be empty".to_string()));
                }
                if text != note.text {
                    self.notes
                        .update(MovieNote {
                            text: text.to_string(),
                            ..note
                        })
                        .await?;
                }
            }
            MovieIntent::ExitNoteEditing => {
                scope.state(|state| MovieState {
                    editing: None,
                    ..state
                });
            }
        }
        Ok(())
    }

    fn on_subscribe(&self, scope: &Scope<Self>) {
        scope.intent(MovieIntent::LoadMovieData);
        scope.intent(MovieIntent::LoadFavoriteStatus);
        scope.intent(MovieIntent::LoadNotes);
    }

    fn on_error(&self, error: AppError, scope: &Scope<Self>) {
        tracing::warn!(
            screen = self.name(),
            movie_id = %self.movie_id,
            kind = ?error.kind(),
            error = %error,
            "Movie action failed"
        );
        scope.emit(MovieEvent::ShowMessage(error.user_message()));
    }
}
