//! Base trait for intents (user/system actions) in MVI architecture.

use std::fmt::Debug;

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (selecting a genre, toggling a favorite)
/// - Lifecycle triggers (initial load on first subscription)
/// - Follow-up work a reducer schedules for itself
///
/// Intents are processed one at a time by the container's reducer.
pub trait Intent: Debug + Send + 'static {}
