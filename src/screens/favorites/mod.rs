//! Saved favorites with multi-select removal.

mod intent;
mod reducer;
mod state;

pub use intent::{FavoritesEvent, FavoritesIntent};
pub use reducer::FavoritesReducer;
pub use state::FavoritesState;
