//! Reducer trait for MVI architecture.

use async_trait::async_trait;

use super::event::UiEvent;
use super::intent::Intent;
use super::scope::Scope;
use super::state::UiState;
use crate::error::AppError;

/// Reducer transforms state based on intents.
///
/// The container calls [`Reducer::reduce`] for one intent at a time, so a
/// read-modify-write through [`Scope::state`] inside a reducer body never
/// races another reducer body of the same container. Work that should not
/// hold up later intents goes through [`Scope::launch`].
#[async_trait]
pub trait Reducer: Send + Sync + Sized + 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// One-shot events this reducer may emit.
    type Event: UiEvent;

    /// Screen name for logging.
    fn name(&self) -> &'static str;

    /// Process one intent.
    ///
    /// An `Err` does not stop the container; it is handed to
    /// [`Reducer::on_error`].
    async fn reduce(&self, intent: Self::Intent, scope: &Scope<Self>) -> Result<(), AppError>;

    /// Called once, on the first subscription to the container.
    ///
    /// Default implementation does nothing.
    fn on_subscribe(&self, _scope: &Scope<Self>) {}

    /// Called when [`Reducer::reduce`] or a detached task fails.
    ///
    /// Default implementation logs the failure.
    fn on_error(&self, error: AppError, _scope: &Scope<Self>) {
        tracing::warn!(
            screen = self.name(),
            kind = ?error.kind(),
            error = %error,
            "Intent failed"
        );
    }
}
