use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use tokio::sync::mpsc;

use super::commands::{Cli, Command};
use super::display;
use crate::config::Config;
use crate::mvi::Subscription;
use crate::navigation::{Destination, Navigator};
use crate::screens::favorites::{FavoritesEvent, FavoritesIntent, FavoritesState};
use crate::screens::home::{HomeEvent, HomeIntent, HomeState};
use crate::screens::movie::{MovieEvent, MovieIntent, MovieState};
use crate::screens::search::{SearchEvent, SearchIntent, SearchState};
use crate::screens::LoadStatus;
use crate::services::Services;

/// Extra time on top of the worst-case catalog request before giving up.
const SETTLE_SLACK: Duration = Duration::from_secs(5);

/// Runs one command against freshly opened services.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }
    config.validate()?;

    let services = Services::open(&config).context("failed to open services")?;
    let mut session = Session {
        nav: Navigator::new(services.clone(), config.container.clone()),
        services,
        patience: patience(&config),
    };

    let result = session.execute(cli.command).await;
    session.nav.shutdown().await;
    result
}

/// Upper bound for a screen to settle: every retry timing out, plus slack.
fn patience(config: &Config) -> Duration {
    let attempts = u64::from(config.catalog.max_retries) + 1;
    let backoff = Duration::from_millis(config.catalog.retry_backoff_base_ms)
        .saturating_mul(2u32.saturating_pow(config.catalog.max_retries));
    Duration::from_secs(u64::from(config.catalog.timeout_seconds) * attempts)
        .saturating_add(backoff)
        .saturating_add(SETTLE_SLACK)
}

struct Session {
    nav: Navigator,
    services: Services,
    patience: Duration,
}

impl Session {
    async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Browse { genre, list, pages } => self.browse(genre, list, pages).await,
            Command::Search { query, pages } => self.search(query, pages).await,
            Command::History { remove } => self.history(remove).await,
            Command::Genres => {
                let state = self.home_filters().await?;
                state.genres.iter().for_each(|genre| println!("{}", genre));
                Ok(())
            }
            Command::Lists => {
                let state = self.home_filters().await?;
                state.lists.iter().for_each(|list| println!("{}", list));
                Ok(())
            }
            Command::Random => self.random().await,
            Command::Movie { id, favorite, note } => self.movie(id, favorite, note).await,
            Command::Favorites { remove } => self.favorites(remove).await,
        }
    }

    async fn browse(&mut self, genre: Option<String>, list: Option<String>, pages: u32) -> Result<()> {
        let (messages, mut errors) = mpsc::unbounded_channel();
        let home = self.nav.home();
        let mut sub = home.subscribe(move |event| {
            if let HomeEvent::ShowMessage(message) = event {
                let _ = messages.send(message);
            }
        });
        let mut state = settle(&mut sub, &mut errors, self.patience, |s: &HomeState| {
            s.loaded_page >= 1 || s.status.error().is_some()
        })
        .await?;
        check(&state.status)?;

        if let Some(genre) = genre {
            home.intent(HomeIntent::SelectGenre(genre.clone()));
            state = settle(&mut sub, &mut errors, self.patience, |s: &HomeState| {
                s.selected_genre.as_ref() == Some(&genre) && !s.status.is_loading()
            })
            .await?;
            check(&state.status)?;
        }
        if let Some(list) = list {
            home.intent(HomeIntent::SelectList(list.clone()));
            state = settle(&mut sub, &mut errors, self.patience, |s: &HomeState| {
                s.selected_list.as_ref() == Some(&list) && !s.status.is_loading()
            })
            .await?;
            check(&state.status)?;
        }

        while state.loaded_page < pages && state.has_more {
            let target = state.loaded_page + 1;
            home.intent(HomeIntent::LoadMore);
            state = settle(&mut sub, &mut errors, self.patience, |s: &HomeState| {
                s.loaded_page >= target || s.status.error().is_some()
            })
            .await?;
            check(&state.status)?;
        }

        display::titles(&state.movies);
        Ok(())
    }

    async fn home_filters(&mut self) -> Result<HomeState> {
        let (messages, mut errors) = mpsc::unbounded_channel();
        let mut sub = self.nav.home().subscribe(move |event| {
            if let HomeEvent::ShowMessage(message) = event {
                let _ = messages.send(message);
            }
        });
        settle(&mut sub, &mut errors, self.patience, |s: &HomeState| {
            !s.genres.is_empty() && !s.lists.is_empty()
        })
        .await
    }

    async fn random(&mut self) -> Result<()> {
        let (messages, mut errors) = mpsc::unbounded_channel();
        let (opened, mut open) = mpsc::unbounded_channel();
        let home = self.nav.home();
        let _sub = home.subscribe(move |event| match event {
            HomeEvent::ShowMessage(message) => {
                let _ = messages.send(message);
            }
            HomeEvent::OpenMovie(id) => {
                let _ = opened.send(id);
            }
        });
        home.intent(HomeIntent::OpenRandom);

        let wait = async {
            tokio::select! {
                Some(id) = open.recv() => Ok(id),
                Some(message) = errors.recv() => Err(anyhow!(message)),
                else => Err(anyhow!("home screen closed")),
            }
        };
        let id = tokio::time::timeout(self.patience, wait)
            .await
            .context("timed out waiting for a random movie")??;
        self.movie(id, false, None).await
    }

    async fn search(&mut self, query: String, pages: u32) -> Result<()> {
        self.nav.navigate(Destination::Search).await;
        let (messages, mut errors) = mpsc::unbounded_channel();
        let search = self.nav.search();
        let mut sub = search.subscribe(move |event| {
            let SearchEvent::ShowMessage(message) = event;
            let _ = messages.send(message);
        });

        let wanted = query.trim().to_string();
        if wanted.is_empty() {
            bail!("search query is empty");
        }
        search.intent(SearchIntent::UpdateQuery(query));
        let mut state = settle(&mut sub, &mut errors, self.patience, |s: &SearchState| {
            s.query == wanted && matches!(s.status, LoadStatus::Loaded | LoadStatus::Failed(_))
        })
        .await?;
        check(&state.status)?;

        while state.loaded_page < pages && state.has_more {
            let target = state.loaded_page + 1;
            search.intent(SearchIntent::LoadMore);
            state = settle(&mut sub, &mut errors, self.patience, |s: &SearchState| {
                s.loaded_page >= target || s.status.error().is_some()
            })
            .await?;
            check(&state.status)?;
        }

        if state.is_empty_result() {
            println!("No results for \"{}\"", wanted);
        }
        display::titles(&state.results);
        Ok(())
    }

    async fn history(&mut self, remove: Option<String>) -> Result<()> {
        self.nav.navigate(Destination::Search).await;
        let (messages, mut errors) = mpsc::unbounded_channel();
        let search = self.nav.search();
        let mut sub = search.subscribe(move |event| {
            let SearchEvent::ShowMessage(message) = event;
            let _ = messages.send(message);
        });

        let stored = self.services.history.all().get();
        let mut state = settle(&mut sub, &mut errors, self.patience, |s: &SearchState| {
            s.history == stored
        })
        .await?;

        if let Some(id) = remove {
            let item = state
                .history
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("no search history entry with id {}", id))?;
            search.intent(SearchIntent::RemoveHistoryItem(item));
            state = settle(&mut sub, &mut errors, self.patience, |s: &SearchState| {
                s.history.iter().all(|item| item.id != id)
            })
            .await?;
        }

        display::history(&state.history);
        Ok(())
    }

    async fn movie(&mut self, id: String, toggle_favorite: bool, note: Option<String>) -> Result<()> {
        self.nav.navigate(Destination::Movie(id.clone())).await;
        let movie = self
            .nav
            .movie()
            .context("movie screen did not open")?;
        let (messages, mut errors) = mpsc::unbounded_channel();
        let mut sub = movie.subscribe(move |event| {
            let MovieEvent::ShowMessage(message) = event;
            let _ = messages.send(message);
        });

        let stored_notes = self.services.notes.by_movie(&id).get();
        let mut state = settle(&mut sub, &mut errors, self.patience, |s: &MovieState| {
            !s.status.is_loading() && s.is_favorite.is_some() && s.notes == stored_notes
        })
        .await?;
        check(&state.status)?;

        if toggle_favorite {
            let wanted = state.is_favorite.map(|current| !current);
            movie.intent(MovieIntent::ToggleFavorite);
            state = settle(&mut sub, &mut errors, self.patience, |s: &MovieState| {
                s.is_favorite == wanted
            })
            .await?;
        }

        if let Some(text) = note {
            let count = state.notes.len() + 1;
            movie.intent(MovieIntent::AddNote(text));
            state = settle(&mut sub, &mut errors, self.patience, |s: &MovieState| {
                s.notes.len() == count
            })
            .await?;
        }

        display::movie(&state);
        Ok(())
    }

    async fn favorites(&mut self, remove: Vec<String>) -> Result<()> {
        self.nav.navigate(Destination::Favorites).await;
        let (messages, mut errors) = mpsc::unbounded_channel();
        let favorites = self.nav.favorites();
        let mut sub = favorites.subscribe(move |event| {
            let FavoritesEvent::ShowMessage(message) = event;
            let _ = messages.send(message);
        });

        let stored = self.services.favorites.all().get();
        let mut state = settle(&mut sub, &mut errors, self.patience, |s: &FavoritesState| {
            s.favorites == stored
        })
        .await?;

        if !remove.is_empty() {
            for id in &remove {
                let favorite = state
                    .favorites
                    .iter()
                    .find(|favorite| &favorite.movie_id == id)
                    .cloned()
                    .ok_or_else(|| anyhow!("{} is not a favorite", id))?;
                favorites.intent(FavoritesIntent::SwitchSelection(favorite));
            }
            favorites.intent(FavoritesIntent::RemoveSelected);
            state = settle(&mut sub, &mut errors, self.patience, |s: &FavoritesState| {
                s.favorites.iter().all(|favorite| !remove.contains(&favorite.movie_id))
            })
            .await?;
        }

        display::favorites(&state.favorites);
        Ok(())
    }
}

/// Waits until `done` accepts the screen state, failing on the first
/// message the screen reports.
async fn settle<S>(
    subscription: &mut Subscription<S>,
    errors: &mut mpsc::UnboundedReceiver<String>,
    patience: Duration,
    done: impl FnMut(&S) -> bool,
) -> Result<S>
where
    S: Clone + Send + Sync + 'static,
{
    let wait = async {
        tokio::select! {
            state = subscription.wait_for(done) => state.context("screen closed"),
            Some(message) = errors.recv() => Err(anyhow!(message)),
        }
    };
    tokio::time::timeout(patience, wait)
        .await
        .context("timed out waiting for the screen")?
}

fn check(status: &LoadStatus) -> Result<()> {
    match status.error() {
        Some(error) => bail!("{}", error.message),
        None => Ok(()),
    }
}
