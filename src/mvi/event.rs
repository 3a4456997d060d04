//! Base trait for one-shot events in MVI architecture.

use std::fmt::Debug;

/// Marker trait for side-effect signals that are not part of state.
///
/// Events reach only the subscribers attached when they are emitted and
/// are never replayed.
pub trait UiEvent: Clone + Debug + Send + 'static {}
