//! Generic per-screen MVI container.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};

use super::reducer::Reducer;
use super::scope::{Scope, Shared};
use super::subscription::Subscription;
use crate::config::ContainerConfig;
use crate::live::Live;
use crate::shutdown::TeardownSignal;

/// Holds one screen's state and runs its reducer.
///
/// Intents are processed on a single lane in arrival order. The container
/// is torn down by [`Container::close`] or by dropping it; afterwards
/// intents are ignored.
pub struct Container<R: Reducer> {
    scope: Scope<R>,
    subscribed: AtomicBool,
    lane: Option<JoinHandle<()>>,
    grace: Duration,
}

impl<R: Reducer> Container<R> {
    /// Creates a container with default settings.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(reducer: R, initial: R::State) -> Self {
        Self::with_config(reducer, initial, &ContainerConfig::default())
    }

    pub fn with_config(reducer: R, initial: R::State, config: &ContainerConfig) -> Self {
        let name = reducer.name();
        let (state, _) = watch::channel(initial);
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        let (intents, receiver) = mpsc::unbounded_channel();

        let scope = Scope {
            shared: Arc::new(Shared {
                name,
                reducer: Arc::new(reducer),
                state,
                events,
                intents,
                teardown: TeardownSignal::new(),
                tasks: Mutex::new(JoinSet::new()),
                running: Mutex::new(None),
                collectors: Mutex::new(HashSet::new()),
            }),
        };

        let lane = tokio::spawn(run_lane(scope.clone(), receiver));
        tracing::debug!(screen = name, "Container created");

        Self {
            scope,
            subscribed: AtomicBool::new(false),
            lane: Some(lane),
            grace: Duration::from_millis(config.teardown_grace_ms),
        }
    }

    /// Enqueues an intent. Never blocks; a no-op after teardown.
    pub fn intent(&self, intent: R::Intent) {
        self.scope.intent(intent);
    }

    /// Attaches an observer.
    ///
    /// The returned handle starts at the current state. `on_event` receives
    /// events emitted from now on. The first call on a container runs
    /// [`Reducer::on_subscribe`].
    pub fn subscribe<F>(&self, mut on_event: F) -> Subscription<R::State>
    where
        F: FnMut(R::Event) + Send + 'static,
    {
        let shared = &self.scope.shared;
        let state = Live::from_receiver(shared.state.subscribe());

        // Subscribe to events before on_subscribe so this observer sees
        // events raised by the initial intents.
        let mut events = shared.events.subscribe();
        let name = shared.name;
        let pump = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => on_event(event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(screen = name, skipped, "Subscriber lagged, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let first = !self.subscribed.swap(true, Ordering::SeqCst);
        if first && self.scope.is_active() {
            tracing::debug!(screen = name, "First subscriber attached");
            shared.reducer.on_subscribe(&self.scope);
        }

        Subscription::new(state, pump)
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> R::State {
        self.scope.current()
    }

    pub fn is_closed(&self) -> bool {
        !self.scope.is_active()
    }

    /// Graceful teardown.
    ///
    /// Stops the lane (cancelling an in-flight reducer body), then waits up
    /// to the configured grace period for detached tasks before aborting
    /// the rest.
    pub async fn close(mut self) {
        let name = self.scope.shared.name;
        self.scope.shared.teardown.signal();

        if let Some(lane) = self.lane.take() {
            let _ = lane.await;
        }

        let mut tasks = std::mem::take(&mut *self.scope.shared.tasks.lock());
        let drained = tokio::time::timeout(self.grace, async {
            while tasks.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                screen = name,
                remaining = tasks.len(),
                "Detached tasks still running after grace period, aborting"
            );
        }
        tracing::debug!(screen = name, "Container closed");
    }
}

impl<R: Reducer> Drop for Container<R> {
    fn drop(&mut self) {
        if self.scope.shared.teardown.signal() {
            tracing::debug!(screen = self.scope.shared.name, "Container dropped");
        }
        self.scope.shared.tasks.lock().abort_all();
        if let Some(body) = self.scope.shared.running.lock().take() {
            body.abort();
        }
        if let Some(lane) = self.lane.take() {
            lane.abort();
        }
    }
}

async fn run_lane<R: Reducer>(scope: Scope<R>, mut intents: mpsc::UnboundedReceiver<R::Intent>) {
    let name = scope.shared.name;
    let teardown = scope.shared.teardown.clone();

    loop {
        let intent = tokio::select! {
            biased;
            _ = teardown.wait() => break,
            next = intents.recv() => match next {
                Some(intent) => intent,
                None => break,
            },
        };

        tracing::trace!(screen = name, ?intent, "Processing intent");

        // Each body runs in its own task so a panic is contained to the
        // intent that caused it.
        let body = {
            let scope = scope.clone();
            tokio::spawn(async move {
                let reducer = Arc::clone(&scope.shared.reducer);
                reducer.reduce(intent, &scope).await
            })
        };
        let abort = body.abort_handle();
        {
            // Drop signals teardown before taking this slot, so a body
            // registered after that is aborted here instead.
            let mut running = scope.shared.running.lock();
            if teardown.is_torn_down() {
                abort.abort();
            } else {
                *running = Some(abort.clone());
            }
        }

        let outcome = tokio::select! {
            biased;
            _ = teardown.wait() => {
                abort.abort();
                break;
            }
            outcome = body => outcome,
        };
        scope.shared.running.lock().take();

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(error)) => scope.shared.reducer.on_error(error, &scope),
            Err(err) if err.is_panic() => {
                tracing::error!(screen = name, "Reducer panicked, continuing with next intent");
            }
            Err(_) => {}
        }
    }

    tracing::debug!(screen = name, "Processing lane stopped");
}
