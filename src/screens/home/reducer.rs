use std::sync::Arc;

use async_trait::async_trait;

use super::intent::{HomeEvent, HomeIntent};
use super::state::HomeState;
use crate::catalog::{CatalogApi, TitleInfo, TitlesPage};
use crate::error::{AppError, ScreenError};
use crate::mvi::{Reducer, Scope};
use crate::screens::LoadStatus;

pub struct HomeReducer {
    catalog: Arc<dyn CatalogApi>,
}

impl HomeReducer {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }

    /// Fetches `page` with the current filter. Page 1 replaces the list,
    /// later pages append to it.
    async fn load_page(&self, scope: &Scope<Self>, page: u32) {
        let filter = scope.modify(|state| {
            let filter = state.filter();
            (
                HomeState {
                    status: LoadStatus::Loading,
                    ..state
                },
                filter,
            )
        });

        match self.catalog.titles(page, &filter).await {
            Ok(result) => scope.state(|state| apply_page(state, page, result)),
            Err(err) => {
                let err = AppError::from(err);
                tracing::warn!(page, ?filter, error = %err, "Failed to load titles");
                scope.state(|state| HomeState {
                    status: LoadStatus::Failed(ScreenError::from(&err)),
                    ..state
                });
            }
        }
    }

    async fn refresh(&self, scope: &Scope<Self>) -> Result<(), AppError> {
        let filter = scope.modify(|state| {
            let filter = state.filter();
            (
                HomeState {
                    refreshing: true,
                    ..state
                },
                filter,
            )
        });

        let result = self.catalog.titles(1, &filter).await;
        scope.state(|state| HomeState {
            refreshing: false,
            ..state
        });
        let page = result?;
        scope.state(|state| apply_page(state, 1, page));
        self.load_filters(scope);
        Ok(())
    }

    fn load_filters(&self, scope: &Scope<Self>) {
        let catalog = Arc::clone(&self.catalog);
        let task_scope = scope.clone();
        scope.launch(async move {
            let genres = catalog.genres().await?;
            task_scope.state(|state| HomeState { genres, ..state });
            Ok(())
        });

        let catalog = Arc::clone(&self.catalog);
        let task_scope = scope.clone();
        scope.launch(async move {
            let lists = catalog.lists().await?;
            task_scope.state(|state| HomeState { lists, ..state });
            Ok(())
        });
    }

    /// Resets paging after a filter change and loads page 1.
    async fn reload(&self, scope: &Scope<Self>, update: impl FnOnce(&mut HomeState)) {
        scope.state(|mut state| {
            update(&mut state);
            state.movies.clear();
            state.loaded_page = 0;
            state.has_more = false;
            state.status = LoadStatus::Loading;
            state
        });
        self.load_page(scope, 1).await;
    }
}

fn apply_page(mut state: HomeState, page: u32, result: TitlesPage) -> HomeState {
    if page == 1 {
        state.movies.clear();
    }
    let fresh: Vec<TitleInfo> = result
        .results
        .iter()
        .filter(|title| !state.movies.iter().any(|known| known.id == title.id))
        .cloned()
        .collect();
    state.has_more = result.has_next() && !result.results.is_empty();
    state.movies.extend(fresh);
    state.loaded_page = page;
    state.status = LoadStatus::Loaded;
    state
}

#[async_trait]
impl Reducer for HomeReducer {
    type State = HomeState;
    type Intent = HomeIntent;
    type Event = HomeEvent;

    fn name(&self) -> &'static str {
        "home"
    }

    async fn reduce(&self, intent: HomeIntent, scope: &Scope<Self>) -> Result<(), AppError> {
        match intent {
            HomeIntent::Load => {
                self.load_filters(scope);
                self.reload(scope, |_| {}).await;
            }
            HomeIntent::LoadMore => {
                let state = scope.current();
                if state.status.is_loading() || state.refreshing || !state.has_more {
                    tracing::trace!(page = state.loaded_page, "LoadMore ignored");
                    return Ok(());
                }
                self.load_page(scope, state.loaded_page + 1).await;
            }
            HomeIntent::Refresh => self.refresh(scope).await?,
            HomeIntent::SelectGenre(genre) => {
                self.reload(scope, |state| state.selected_genre = Some(genre))
                    .await;
            }
            HomeIntent::ClearGenre => {
                self.reload(scope, |state| state.selected_genre = None).await;
            }
            HomeIntent::SelectList(list) => {
                self.reload(scope, |state| state.selected_list = Some(list))
                    .await;
            }
            HomeIntent::ClearList => {
                self.reload(scope, |state| state.selected_list = None).await;
            }
            HomeIntent::Retry => {
                let next = scope.current().loaded_page + 1;
                self.load_page(scope, next).await;
            }
            HomeIntent::OpenRandom => {
                let movie = self.catalog.random_title().await?;
                tracing::debug!(movie_id = %movie.id, "Opening random movie");
                scope.emit(HomeEvent::OpenMovie(movie.id));
            }
        }
        Ok(())
    }

    fn on_subscribe(&self, scope: &Scope<Self>) {
        scope.intent(HomeIntent::Load);
    }

    fn on_error(&self, error: AppError, scope: &Scope<Self>) {
        tracing::warn!(screen = self.name(), kind = ?error.kind(), error = %error, "Home action failed");
        scope.emit(HomeEvent::ShowMessage(error.user_message()));
    }
}
