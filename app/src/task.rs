//! Cancellable background tasks.
//!
//! Every user action runs as one task spawned through a `TaskSet`. Each task
//! gets a child of the set's cancellation token, so it can be cancelled on its
//! own through its `TaskHandle` or together with its siblings when the owning
//! controller shuts down.

use std::future::Future;

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// Handle to one spawned action. Dropping it detaches the task.
#[derive(Debug)]
pub struct TaskHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl TaskHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the task to run to completion or observe its cancellation.
    pub async fn join(self) -> Result<(), JoinError> {
        self.join.await
    }
}

#[derive(Debug, Default)]
pub struct TaskSet {
    token: CancellationToken,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` on the current Tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn spawn<F>(&self, future: F) -> TaskHandle
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.child_token();
        let cancelled = token.clone();
        let join = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {}
                _ = future => {}
            }
        });
        TaskHandle { token, join }
    }

    /// Cancel every task spawned so far and any spawned later.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.token.is_cancelled()
    }
}
