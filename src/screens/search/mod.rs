//! Keyword search with a persisted query history.

mod intent;
mod reducer;
mod state;

pub use intent::{SearchEvent, SearchIntent};
pub use reducer::SearchReducer;
pub use state::SearchState;
