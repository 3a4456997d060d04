//! Paged movie listing with genre and list filters.

mod intent;
mod reducer;
mod state;

pub use intent::{HomeEvent, HomeIntent};
pub use reducer::HomeReducer;
pub use state::HomeState;
