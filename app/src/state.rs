//! Observable state owned by a controller.
//!
//! # Design
//! A `StateHolder` wraps a `tokio::sync::watch` channel. Readers take
//! immutable snapshots or subscribe for change notifications; writers go
//! through closures that run under the channel's lock, so a guard such as
//! "is this still the latest request?" is checked atomically with the write.
//!
//! Once disposed, the holder ignores every further update. Controllers
//! dispose their state on teardown so late task completions cannot touch it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

struct Shared<S> {
    tx: watch::Sender<S>,
    disposed: AtomicBool,
}

pub struct StateHolder<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for StateHolder<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: Clone> StateHolder<S> {
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            shared: Arc::new(Shared {
                tx,
                disposed: AtomicBool::new(false),
            }),
        }
    }

    pub fn snapshot(&self) -> S {
        self.shared.tx.borrow().clone()
    }

    /// Receiver that observes every later update.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.shared.tx.subscribe()
    }

    /// Replace the state. Returns false if the holder is disposed.
    pub fn set(&self, next: S) -> bool {
        self.update(|state| {
            *state = next;
            true
        })
    }

    /// Run `f` on the state under the lock. `f` returns whether it changed
    /// anything; subscribers are notified only then. Does nothing once
    /// disposed.
    pub fn update(&self, f: impl FnOnce(&mut S) -> bool) -> bool {
        let disposed = &self.shared.disposed;
        self.shared.tx.send_if_modified(|state| {
            if disposed.load(Ordering::Acquire) {
                return false;
            }
            f(state)
        })
    }

    /// Stop accepting updates. Subscribers keep the last value.
    pub fn dispose(&self) {
        let disposed = &self.shared.disposed;
        self.shared.tx.send_if_modified(|_| {
            disposed.store(true, Ordering::Release);
            false
        });
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::Acquire)
    }
}
