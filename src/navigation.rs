//! Back stack of screens and the containers behind them.
//!
//! Tab screens keep a single container for the navigator's lifetime, so
//! switching tabs preserves their state. Movie screens get a fresh container
//! on every push, closed when popped.

use crate::config::ContainerConfig;
use crate::mvi::Container;
use crate::screens::favorites::{FavoritesReducer, FavoritesState};
use crate::screens::home::{HomeReducer, HomeState};
use crate::screens::movie::{MovieReducer, MovieState};
use crate::screens::search::{SearchReducer, SearchState};
use crate::screens::LoadStatus;
use crate::services::Services;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Home,
    Search,
    Favorites,
    Movie(String),
}

impl Destination {
    pub fn is_tab(&self) -> bool {
        !matches!(self, Destination::Movie(_))
    }
}

pub struct Navigator {
    services: Services,
    config: ContainerConfig,
    stack: Vec<Destination>,
    home: Option<Container<HomeReducer>>,
    search: Option<Container<SearchReducer>>,
    favorites: Option<Container<FavoritesReducer>>,
    /// One per `Movie` entry in `stack`, in the same order.
    movies: Vec<Container<MovieReducer>>,
}

impl Navigator {
    /// Starts on [`Destination::Home`].
    pub fn new(services: Services, config: ContainerConfig) -> Self {
        Self {
            services,
            config,
            stack: vec![Destination::Home],
            home: None,
            search: None,
            favorites: None,
            movies: Vec::new(),
        }
    }

    pub fn current(&self) -> &Destination {
        // The stack never drops below its root entry.
        &self.stack[self.stack.len() - 1]
    }

    pub fn stack(&self) -> &[Destination] {
        &self.stack
    }

    /// Switches to a tab, or pushes a movie screen.
    ///
    /// Selecting a tab clears movie screens above it; selecting the current
    /// screen does nothing.
    pub async fn navigate(&mut self, destination: Destination) {
        if *self.current() == destination {
            return;
        }
        tracing::debug!(from = ?self.current(), to = ?destination, "Navigating");

        match destination {
            Destination::Movie(id) => {
                let reducer = MovieReducer::new(
                    id.clone(),
                    self.services.catalog.clone(),
                    self.services.favorites.clone(),
                    self.services.notes.clone(),
                );
                self.movies.push(Container::with_config(
                    reducer,
                    MovieState::initial(id.clone()),
                    &self.config,
                ));
                self.stack.push(Destination::Movie(id));
            }
            tab => {
                while !self.current().is_tab() {
                    self.pop_movie().await;
                }
                self.stack.clear();
                self.stack.push(tab);
            }
        }
    }

    /// Goes back one screen. Returns `false` at the root.
    pub async fn back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        if self.current().is_tab() {
            self.stack.pop();
        } else {
            self.pop_movie().await;
        }
        true
    }

    async fn pop_movie(&mut self) {
        self.stack.pop();
        if let Some(container) = self.movies.pop() {
            container.close().await;
        }
        if self.stack.is_empty() {
            self.stack.push(Destination::Home);
        }
    }

    pub fn home(&mut self) -> &Container<HomeReducer> {
        let (services, config) = (&self.services, &self.config);
        self.home.get_or_insert_with(|| {
            Container::with_config(
                HomeReducer::new(services.catalog.clone()),
                HomeState {
                    status: LoadStatus::Loading,
                    ..HomeState::default()
                },
                config,
            )
        })
    }

    pub fn search(&mut self) -> &Container<SearchReducer> {
        let (services, config) = (&self.services, &self.config);
        self.search.get_or_insert_with(|| {
            Container::with_config(
                SearchReducer::new(services.catalog.clone(), services.history.clone()),
                SearchState::default(),
                config,
            )
        })
    }

    pub fn favorites(&mut self) -> &Container<FavoritesReducer> {
        let (services, config) = (&self.services, &self.config);
        self.favorites.get_or_insert_with(|| {
            Container::with_config(
                FavoritesReducer::new(services.favorites.clone()),
                FavoritesState::default(),
                config,
            )
        })
    }

    /// Container of the topmost movie screen.
    pub fn movie(&self) -> Option<&Container<MovieReducer>> {
        self.movies.last()
    }

    /// Closes every container gracefully.
    pub async fn shutdown(mut self) {
        while let Some(container) = self.movies.pop() {
            container.close().await;
        }
        if let Some(home) = self.home.take() {
            home.close().await;
        }
        if let Some(search) = self.search.take() {
            search.close().await;
        }
        if let Some(favorites) = self.favorites.take() {
            favorites.close().await;
        }
        tracing::debug!("Navigator shut down");
    }
}
