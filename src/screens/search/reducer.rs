use std::sync::Arc;

use async_trait::async_trait;

use super::intent::{SearchEvent, SearchIntent};
use super::state::SearchState;
use crate::catalog::CatalogApi;
use crate::error::{AppError, ScreenError};
use crate::mvi::{Reducer, Scope};
use crate::screens::LoadStatus;
use crate::store::{SearchHistoryItem, SearchHistoryRepository};

pub struct SearchReducer {
    catalog: Arc<dyn CatalogApi>,
    history: Arc<dyn SearchHistoryRepository>,
}

impl SearchReducer {
    pub fn new(catalog: Arc<dyn CatalogApi>, history: Arc<dyn SearchHistoryRepository>) -> Self {
        Self { catalog, history }
    }

    async fn search(&self, scope: &Scope<Self>, query: String, page: u32) -> Result<(), AppError> {
        scope.state(|state| {
            if page == 1 {
                SearchState {
                    query: query.clone(),
                    results: Vec::new(),
                    loaded_page: 0,
                    has_more: false,
                    status: LoadStatus::Loading,
                    ..state
                }
            } else {
                SearchState {
                    status: LoadStatus::Loading,
                    ..state
                }
            }
        });

        let result = match self.catalog.search(&query, page).await {
            Ok(result) => result,
            Err(err) => {
                let err = AppError::from(err);
                tracing::warn!(%query, page, error = %err, "Search failed");
                scope.state(|state| SearchState {
                    status: LoadStatus::Failed(ScreenError::from(&err)),
                    ..state
                });
                return Ok(());
            }
        };

        let found = !result.results.is_empty();
        scope.state(|mut state| {
            let fresh: Vec<_> = result
                .results
                .iter()
                .filter(|title| !state.results.iter().any(|known| known.id == title.id))
                .cloned()
                .collect();
            state.results.extend(fresh);
            state.has_more = result.has_next() && found;
            state.loaded_page = page;
            state.status = LoadStatus::Loaded;
            state
        });

        if page == 1 && found {
            self.remember(&query).await?;
        }
        Ok(())
    }

    /// Records `query` as the newest history entry, dropping older
    /// entries with the same text.
    async fn remember(&self, query: &str) -> Result<(), AppError> {
        let duplicates: Vec<SearchHistoryItem> = self
            .history
            .all()
            .get()
            .into_iter()
            .filter(|item| item.query.eq_ignore_ascii_case(query))
            .collect();
        for item in &duplicates {
            self.history.delete(item).await?;
        }
        self.history.insert(SearchHistoryItem::new(query)).await?;
        Ok(())
    }
}

#[async_trait]
impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;
    type Event = SearchEvent;

    fn name(&self) -> &'static str {
        "search"
    }

    async fn reduce(&self, intent: SearchIntent, scope: &Scope<Self>) -> Result<(), AppError> {
        match intent {
            SearchIntent::LoadHistory => {
                scope.collect("history", self.history.all(), |state, history| SearchState {
                    history,
                    ..state
                });
            }
            SearchIntent::UpdateQuery(query) => {
                let query = query.trim();
                if query.is_empty() {
                    clear_query(scope);
                    return Ok(());
                }
                self.search(scope, query.to_string(), 1).await?;
            }
            SearchIntent::LoadMore => {
                let state = scope.current();
                if state.query.is_empty() || state.status.is_loading() || !state.has_more {
                    return Ok(());
                }
                self.search(scope, state.query, state.loaded_page + 1).await?;
            }
            SearchIntent::ClearQuery => clear_query(scope),
            SearchIntent::RemoveHistoryItem(item) => {
                self.history.delete(&item).await?;
            }
            SearchIntent::Retry => {
                let state = scope.current();
                if state.query.is_empty() {
                    return Ok(());
                }
                self.search(scope, state.query, state.loaded_page + 1).await?;
            }
        }
        Ok(())
    }

    fn on_subscribe(&self, scope: &Scope<Self>) {
        scope.intent(SearchIntent::LoadHistory);
    }

    fn on_error(&self, error: AppError, scope: &Scope<Self>) {
        tracing::warn!(screen = self.name(), kind = ?error.kind(), error = %error, "Search action failed");
        scope.emit(SearchEvent::ShowMessage(error.user_message()));
    }
}

/// Drops query and results, keeping the history.
fn clear_query(scope: &Scope<SearchReducer>) {
    scope.state(|state| SearchState {
        history: state.history,
        ..SearchState::default()
    });
}
