//! Single movie: details, favorite toggle and personal notes.

mod intent;
mod reducer;
mod state;

pub use intent::{MovieEvent, MovieIntent};
pub use reducer::MovieReducer;
pub use state::MovieState;
