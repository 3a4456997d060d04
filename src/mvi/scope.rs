//! Handle given to reducers for touching container state.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{AbortHandle, JoinSet};

use super::reducer::Reducer;
use crate::error::AppError;
use crate::live::Live;
use crate::shutdown::TeardownSignal;

pub(super) struct Shared<R: Reducer> {
    pub(super) name: &'static str,
    pub(super) reducer: Arc<R>,
    pub(super) state: watch::Sender<R::State>,
    pub(super) events: broadcast::Sender<R::Event>,
    pub(super) intents: mpsc::UnboundedSender<R::Intent>,
    pub(super) teardown: TeardownSignal,
    pub(super) tasks: Mutex<JoinSet<()>>,
    /// Reducer body currently running on the lane.
    pub(super) running: Mutex<Option<AbortHandle>>,
    /// Keys of the collectors started so far.
    pub(super) collectors: Mutex<HashSet<&'static str>>,
}

/// Reducer-side access to a container.
///
/// Cloned into detached tasks so they can publish late results. All state
/// writes go through the same watch sender, which serializes them.
pub struct Scope<R: Reducer> {
    pub(super) shared: Arc<Shared<R>>,
}

impl<R: Reducer> Clone for Scope<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Reducer> Scope<R> {
    /// Snapshot of the current state.
    pub fn current(&self) -> R::State {
        self.shared.state.borrow().clone()
    }

    /// Replaces the current state with `transform(current)`.
    ///
    /// Subscribers are only notified when the new state differs. The
    /// transform runs under the state lock and must not call back into the
    /// scope.
    pub fn state(&self, transform: impl FnOnce(R::State) -> R::State) {
        self.modify(|current| (transform(current), ()));
    }

    /// Like [`Scope::state`], but also hands a value out of the transform.
    ///
    /// Use this to capture part of the old state and reset it in one step.
    pub fn modify<T>(&self, transform: impl FnOnce(R::State) -> (R::State, T)) -> T {
        let mut output = None;
        self.shared.state.send_if_modified(|slot| {
            let (next, value) = transform(slot.clone());
            output = Some(value);
            if next == *slot {
                false
            } else {
                *slot = next;
                true
            }
        });
        match output {
            Some(value) => value,
            // send_if_modified always runs the closure exactly once.
            None => unreachable!("state transform was not invoked"),
        }
    }

    /// Sends a one-shot event to current subscribers.
    pub fn emit(&self, event: R::Event) {
        if self.shared.events.send(event).is_err() {
            tracing::trace!(screen = self.shared.name, "Event dropped: no subscribers");
        }
    }

    /// Queues a follow-up intent behind those already waiting.
    pub fn intent(&self, intent: R::Intent) {
        if self.shared.teardown.is_torn_down() {
            tracing::trace!(screen = self.shared.name, ?intent, "Intent ignored after teardown");
            return;
        }
        if let Err(rejected) = self.shared.intents.send(intent) {
            tracing::trace!(
                screen = self.shared.name,
                intent = ?rejected.0,
                "Intent ignored: lane stopped"
            );
        }
    }

    /// Runs `task` beside the processing lane.
    ///
    /// The task is owned by the container: a graceful close gives it a grace
    /// period, dropping the container aborts it. Failures go to
    /// [`Reducer::on_error`].
    pub fn launch<F>(&self, task: F)
    where
        F: Future<Output = Result<(), AppError>> + Send + 'static,
    {
        if self.shared.teardown.is_torn_down() {
            tracing::trace!(screen = self.shared.name, "Task not started after teardown");
            return;
        }

        let scope = self.clone();
        let mut tasks = self.shared.tasks.lock();
        reap_finished(self.shared.name, &mut tasks);
        tasks.spawn(async move {
            if let Err(error) = task.await {
                scope.shared.reducer.on_error(error, &scope);
            }
        });
    }

    /// Mirrors `source` into state until teardown or until the source ends.
    ///
    /// `apply` runs once with the current value, then on every change. Only
    /// the first collector started under `key` runs; later calls with the
    /// same key are ignored.
    pub fn collect<T, F>(&self, key: &'static str, mut source: Live<T>, apply: F)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(R::State, T) -> R::State + Send + Sync + 'static,
    {
        if !self.shared.collectors.lock().insert(key) {
            tracing::trace!(screen = self.shared.name, key, "Already collecting");
            return;
        }

        let scope = self.clone();
        let teardown = self.shared.teardown.clone();
        self.launch(async move {
            let initial = source.get();
            scope.state(|current| apply(current, initial));
            loop {
                tokio::select! {
                    _ = teardown.wait() => break,
                    next = source.changed() => match next {
                        Some(value) => scope.state(|current| apply(current, value)),
                        None => break,
                    },
                }
            }
            Ok(())
        });
    }

    /// Returns `false` once the container has been torn down.
    pub fn is_active(&self) -> bool {
        !self.shared.teardown.is_torn_down()
    }
}

fn reap_finished(name: &'static str, tasks: &mut JoinSet<()>) {
    while let Some(result) = tasks.try_join_next() {
        if let Err(err) = result {
            if err.is_panic() {
                tracing::error!(screen = name, "Detached task panicked");
            }
        }
    }
}
