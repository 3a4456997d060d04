//! Teardown signalling shared between a container and its tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// One-way teardown flag with async waiters.
///
/// Cloned into the processing lane and every detached task of a container.
/// Once signalled it never resets.
#[derive(Clone, Default)]
pub struct TeardownSignal {
    torn_down: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl TeardownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time it is called.
    pub fn signal(&self) -> bool {
        let first = !self.torn_down.swap(true, Ordering::SeqCst);
        if first {
            self.notify.notify_waiters();
        }
        first
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    pub async fn wait(&self) {
        // Register with Notify before checking the flag, otherwise a signal
        // landing between the check and the await is lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_torn_down() {
            return;
        }
        notified.await;
    }
}
