//! Screen reducers built on [`crate::mvi`].
//!
//! Each screen module follows the same layout:
//! - `state.rs` - what the screen renders
//! - `intent.rs` - what the screen can ask for, and the events it gets back
//! - `reducer.rs` - how intents turn into repository calls and new state

pub mod favorites;
pub mod home;
pub mod movie;
pub mod search;

mod bulk;
mod selection;
mod status;

pub(crate) use bulk::remove_all;
pub use selection::Selection;
pub use status::LoadStatus;

#[cfg(test)]
pub(crate) mod testing;
