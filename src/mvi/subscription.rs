//! Subscriber handle returned by [`super::Container::subscribe`].

use tokio::task::JoinHandle;

use crate::live::Live;

/// State stream plus the event pump feeding the subscriber's callback.
///
/// Dropping the handle stops event delivery.
pub struct Subscription<S> {
    state: Live<S>,
    events: JoinHandle<()>,
}

impl<S> Subscription<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub(super) fn new(state: Live<S>, events: JoinHandle<()>) -> Self {
        Self { state, events }
    }

    /// Latest state.
    pub fn current(&self) -> S {
        self.state.get()
    }

    /// Waits for the next state. `None` once the container is gone.
    pub async fn changed(&mut self) -> Option<S> {
        self.state.changed().await
    }

    /// Waits until the state satisfies `predicate`.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&S) -> bool) -> Option<S> {
        self.state.wait_for(predicate).await
    }

    /// Independent reader of the same state stream.
    pub fn state(&self) -> Live<S> {
        self.state.clone()
    }
}

impl<S> Drop for Subscription<S> {
    fn drop(&mut self) {
        self.events.abort();
    }
}
