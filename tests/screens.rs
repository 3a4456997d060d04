mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::mock_catalog::{MockCatalog, MockResponse};
use common::{http_catalog, settle, FakeCatalog};
use movieshelf::config::ContainerConfig;
use movieshelf::error::ErrorKind;
use movieshelf::live::Live;
use movieshelf::mvi::Container;
use movieshelf::navigation::{Destination, Navigator};
use movieshelf::screens::favorites::{FavoritesIntent, FavoritesReducer, FavoritesState};
use movieshelf::screens::home::{HomeEvent, HomeIntent, HomeReducer, HomeState};
use movieshelf::screens::movie::{MovieEvent, MovieIntent, MovieReducer, MovieState};
use movieshelf::screens::search::{SearchIntent, SearchReducer, SearchState};
use movieshelf::screens::LoadStatus;
use movieshelf::services::Services;
use movieshelf::store::{
    Favorite, FavoritesRepository, LocalFavorites, LocalSearchHistory, SearchHistoryRepository,
    StoreError,
};
use tempfile::TempDir;
use tokio::sync::mpsc;

fn movie_container(services: &Services, id: &str) -> Container<MovieReducer> {
    Container::new(
        MovieReducer::new(
            id,
            services.catalog.clone(),
            services.favorites.clone(),
            services.notes.clone(),
        ),
        MovieState::initial(id),
    )
}

fn favorite(id: &str) -> Favorite {
    Favorite {
        movie_id: id.to_string(),
        title: format!("Movie {}", id),
        image_url: String::new(),
    }
}

/// Favorites store whose deletes take a while.
struct SlowFavorites {
    inner: LocalFavorites,
    delay: Duration,
}

#[async_trait]
impl FavoritesRepository for SlowFavorites {
    fn all(&self) -> Live<Vec<Favorite>> {
        self.inner.all()
    }

    fn by_movie(&self, movie_id: &str) -> Live<Option<Favorite>> {
        self.inner.by_movie(movie_id)
    }

    async fn insert(&self, item: Favorite) -> Result<(), StoreError> {
        self.inner.insert(item).await
    }

    async fn update(&self, item: Favorite) -> Result<(), StoreError> {
        self.inner.update(item).await
    }

    async fn delete(&self, item: &Favorite) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete(item).await
    }
}

#[tokio::test]
async fn home_loads_titles_and_filters_over_http() {
    let server = MockCatalog::start().await;
    let container = Container::new(
        HomeReducer::new(http_catalog(&server)),
        HomeState::default(),
    );
    let mut sub = container.subscribe(|_| {});

    let state = settle(&mut sub, |s| {
        s.status == LoadStatus::Loaded && !s.genres.is_empty() && !s.lists.is_empty()
    })
    .await;
    assert_eq!(state.movies.len(), 2);
    assert_eq!(state.genres, vec!["Comedy", "Drama"]);

    container.intent(HomeIntent::SelectGenre("Drama".to_string()));
    let state = settle(&mut sub, |s| {
        s.selected_genre.is_some() && s.status == LoadStatus::Loaded
    })
    .await;
    assert!(state.movies.iter().all(|m| m.id.starts_with("Drama-1-")));

    let genre_requests: Vec<_> = server
        .requests_to("/titles")
        .await
        .into_iter()
        .filter(|r| r.query.get("genre").map(String::as_str) == Some("Drama"))
        .collect();
    assert_eq!(genre_requests.len(), 1);
    assert_eq!(genre_requests[0].query.get("page").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn home_paginates_to_the_last_page() {
    let server = MockCatalog::start().await;
    let container = Container::new(
        HomeReducer::new(http_catalog(&server)),
        HomeState::default(),
    );
    let mut sub = container.subscribe(|_| {});
    settle(&mut sub, |s| s.loaded_page == 1).await;

    container.intent(HomeIntent::LoadMore);
    settle(&mut sub, |s| s.loaded_page == 2).await;
    container.intent(HomeIntent::LoadMore);
    let state = settle(&mut sub, |s| s.loaded_page == 3).await;

    assert_eq!(state.movies.len(), 6);
    assert!(!state.has_more);
}

#[tokio::test]
async fn home_random_title_opens_movie() {
    let server = MockCatalog::start().await;
    let container = Container::new(
        HomeReducer::new(http_catalog(&server)),
        HomeState::default(),
    );
    let (tx, mut events) = mpsc::unbounded_channel();
    let _sub = container.subscribe(move |event| {
        let _ = tx.send(event);
    });

    container.intent(HomeIntent::OpenRandom);
    assert_eq!(
        events.recv().await,
        Some(HomeEvent::OpenMovie("tt0000042".to_string()))
    );
}

#[tokio::test]
async fn movie_failure_then_retry_reissues_request() {
    let server = MockCatalog::start().await;
    // Exhaust the client's retries so the screen sees the failure.
    for _ in 0..3 {
        server
            .enqueue("/titles/tt001", MockResponse::error(500, "down"))
            .await;
    }
    let services = Services::in_memory(http_catalog(&server));
    let container = movie_container(&services, "tt001");
    let mut sub = container.subscribe(|_| {});

    let state = settle(&mut sub, |s| matches!(s.status, LoadStatus::Failed(_))).await;
    let error = state.status.error().unwrap();
    assert_eq!(error.kind, ErrorKind::Server);
    assert!(!error.message.is_empty());
    assert!(!error.message.contains("down"));

    container.intent(MovieIntent::Retry);
    let state = settle(&mut sub, |s| s.status == LoadStatus::Loaded).await;
    assert_eq!(state.movie.unwrap().display_title(), "Title tt001");
    assert_eq!(server.requests_to("/titles/tt001").await.len(), 4);
}

#[tokio::test]
async fn movie_favorite_and_notes_flow() {
    let services = Services::in_memory(Arc::new(FakeCatalog::new()));
    let container = movie_container(&services, "tt001");
    let mut sub = container.subscribe(|_| {});
    settle(&mut sub, |s| s.movie.is_some() && s.is_favorite == Some(false)).await;

    container.intent(MovieIntent::ToggleFavorite);
    settle(&mut sub, |s| s.is_favorite == Some(true)).await;
    assert!(services.favorites.by_movie("tt001").get().is_some());

    container.intent(MovieIntent::AddNote("great score".to_string()));
    container.intent(MovieIntent::AddNote("   ".to_string()));
    let state = settle(&mut sub, |s| s.notes.len() == 1).await;
    assert_eq!(state.notes[0].text, "great score");

    let note = state.notes[0].clone();
    container.intent(MovieIntent::RemoveNote(note));
    settle(&mut sub, |s| s.notes.is_empty()).await;

    container.intent(MovieIntent::ToggleFavorite);
    settle(&mut sub, |s| s.is_favorite == Some(false)).await;
    assert!(services.favorites.by_movie("tt001").get().is_none());
}

#[tokio::test]
async fn empty_note_reports_message() {
    let services = Services::in_memory(Arc::new(FakeCatalog::new()));
    let container = movie_container(&services, "tt001");
    let (tx, mut events) = mpsc::unbounded_channel();
    let _sub = container.subscribe(move |event| {
        let _ = tx.send(event);
    });

    container.intent(MovieIntent::AddNote("  ".to_string()));
    let MovieEvent::ShowMessage(message) = events.recv().await.unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
async fn favorite_toggled_elsewhere_updates_open_movie() {
    let services = Services::in_memory(Arc::new(FakeCatalog::new()));
    let container = movie_container(&services, "tt001");
    let mut sub = container.subscribe(|_| {});
    settle(&mut sub, |s| s.is_favorite == Some(false)).await;

    services
        .favorites
        .insert(Favorite {
            movie_id: "tt001".to_string(),
            title: "Title tt001".to_string(),
            image_url: String::new(),
        })
        .await
        .unwrap();
    settle(&mut sub, |s| s.is_favorite == Some(true)).await;
}

#[tokio::test]
async fn search_records_history_over_http() {
    let server = MockCatalog::start().await;
    let history = Arc::new(LocalSearchHistory::in_memory());
    let container = Container::new(
        SearchReducer::new(http_catalog(&server), history.clone()),
        SearchState::default(),
    );
    let mut sub = container.subscribe(|_| {});

    container.intent(SearchIntent::UpdateQuery("alien".to_string()));
    let state = settle(&mut sub, |s| s.history.len() == 1).await;
    assert_eq!(state.results[0].id, "kw-alien-1-a");
    assert_eq!(state.history[0].query, "alien");

    container.intent(SearchIntent::LoadMore);
    let state = settle(&mut sub, |s| s.loaded_page == 2).await;
    assert_eq!(state.results.len(), 4);

    let item = state.history[0].clone();
    container.intent(SearchIntent::RemoveHistoryItem(item));
    settle(&mut sub, |s| s.history.is_empty()).await;
    assert!(history.all().get().is_empty());
}

#[tokio::test]
async fn search_failure_keeps_history_untouched() {
    let fake = Arc::new(FakeCatalog::new());
    fake.set_failing(true);
    let history = Arc::new(LocalSearchHistory::in_memory());
    let container = Container::new(
        SearchReducer::new(fake.clone(), history.clone()),
        SearchState::default(),
    );
    let mut sub = container.subscribe(|_| {});

    container.intent(SearchIntent::UpdateQuery("alien".to_string()));
    settle(&mut sub, |s| matches!(s.status, LoadStatus::Failed(_))).await;
    assert!(history.all().get().is_empty());

    fake.set_failing(false);
    container.intent(SearchIntent::Retry);
    settle(&mut sub, |s| s.status == LoadStatus::Loaded && s.history.len() == 1).await;
    assert_eq!(fake.calls(), vec!["search:alien:1", "search:alien:1"]);
}

#[tokio::test]
async fn favorites_bulk_removal_persists() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(LocalFavorites::open(dir.path()).unwrap());
    for id in ["tt1", "tt2", "tt3"] {
        repository.insert(favorite(id)).await.unwrap();
    }

    let container = Container::new(
        FavoritesReducer::new(repository.clone()),
        FavoritesState::default(),
    );
    let mut sub = container.subscribe(|_| {});
    let state = settle(&mut sub, |s| s.favorites.len() == 3).await;

    container.intent(FavoritesIntent::SwitchSelection(state.favorites[0].clone()));
    container.intent(FavoritesIntent::SwitchSelection(state.favorites[2].clone()));
    settle(&mut sub, |s| s.selected.len() == 2).await;
    container.intent(FavoritesIntent::RemoveSelected);
    settle(&mut sub, |s| s.selected.is_empty()).await;
    // Deletes run detached; a graceful close lets them finish.
    container.close().await;

    let reopened = LocalFavorites::open(dir.path()).unwrap();
    let left: Vec<_> = reopened
        .all()
        .get()
        .into_iter()
        .map(|f| f.movie_id)
        .collect();
    assert_eq!(left, vec!["tt2"]);
}

#[tokio::test]
async fn selection_made_during_removal_is_kept() {
    let repository = Arc::new(SlowFavorites {
        inner: LocalFavorites::in_memory(),
        delay: Duration::from_millis(150),
    });
    for id in ["tt1", "tt2", "tt3"] {
        repository.insert(favorite(id)).await.unwrap();
    }
    let container = Container::new(
        FavoritesReducer::new(repository.clone()),
        FavoritesState::default(),
    );
    let mut sub = container.subscribe(|_| {});
    settle(&mut sub, |s| s.favorites.len() == 3).await;

    container.intent(FavoritesIntent::SwitchSelection(favorite("tt1")));
    container.intent(FavoritesIntent::SwitchSelection(favorite("tt2")));
    settle(&mut sub, |s| s.selected.len() == 2).await;

    container.intent(FavoritesIntent::RemoveSelected);
    container.intent(FavoritesIntent::SwitchSelection(favorite("tt3")));

    // The new selection lands while the deletes are still running.
    let state = settle(&mut sub, |s| s.selected.len() == 1).await;
    assert!(state.selected.contains(&favorite("tt3")));
    assert_eq!(state.favorites.len(), 3);

    let state = settle(&mut sub, |s| s.favorites.len() == 1).await;
    assert_eq!(state.favorites[0].movie_id, "tt3");
    assert_eq!(state.selected.len(), 1);
    assert!(state.selected.contains(&favorite("tt3")));
    assert!(repository.by_movie("tt3").get().is_some());
}

#[tokio::test]
async fn navigator_closes_popped_movie_screens() {
    let fake = Arc::new(FakeCatalog::new());
    let services = Services::in_memory(fake.clone());
    let mut nav = Navigator::new(services, ContainerConfig::default());

    nav.navigate(Destination::Movie("tt001".to_string())).await;
    let mut sub = nav.movie().unwrap().subscribe(|_| {});
    settle(&mut sub, |s| s.movie.is_some()).await;

    assert!(nav.back().await);
    assert_eq!(*nav.current(), Destination::Home);
    // The popped screen's state stream ends once its container is gone.
    let drained = tokio::time::timeout(Duration::from_secs(1), async {
        while sub.changed().await.is_some() {}
    })
    .await;
    assert!(drained.is_ok());
    assert_eq!(fake.title_calls(), 1);

    nav.shutdown().await;
}
