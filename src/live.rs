//! Observable values: current value on subscribe, later values as they change.
//!
//! A [`Live`] never buffers. Slow readers skip intermediate values and see
//! the latest one, which is all a screen needs to render.

use std::fmt;

use tokio::sync::watch;

/// Read handle over a value that may change over time.
#[derive(Clone)]
pub struct Live<T> {
    rx: watch::Receiver<T>,
}

impl<T> Live<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn from_receiver(rx: watch::Receiver<T>) -> Self {
        Self { rx }
    }

    /// A value that never changes.
    pub fn constant(value: T) -> Self {
        let (_tx, rx) = watch::channel(value);
        Self { rx }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Waits for the next value. Returns `None` once the producer is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Waits until the current value satisfies `predicate`, checking the
    /// current value first.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        self.rx.wait_for(predicate).await.ok().map(|value| value.clone())
    }

    /// Derived view that only emits when the projection changes.
    pub fn map<U, F>(&self, project: F) -> Live<U>
    where
        U: Clone + PartialEq + Send + Sync + 'static,
        F: Fn(&T) -> U + Send + 'static,
    {
        derive(self.rx.clone(), project)
    }
}

impl<T: fmt::Debug> fmt::Debug for Live<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Live").field(&*self.rx.borrow()).finish()
    }
}

/// Projects a watched source into a new [`Live`].
///
/// The forwarding task ends when every reader of the result is dropped or
/// the source producer goes away. Must be called inside a Tokio runtime.
pub fn derive<S, T, F>(mut source: watch::Receiver<S>, project: F) -> Live<T>
where
    S: Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(&S) -> T + Send + 'static,
{
    let initial = project(&source.borrow_and_update());
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            let source_alive = tokio::select! {
                changed = source.changed() => changed.is_ok(),
                _ = tx.closed() => false,
            };
            if !source_alive {
                break;
            }

            let next = project(&source.borrow_and_update());
            tx.send_if_modified(|current| {
                if *current == next {
                    false
                } else {
                    *current = next;
                    true
                }
            });
        }
    });

    Live { rx }
}
