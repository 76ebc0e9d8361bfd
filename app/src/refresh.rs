//! Controller behind the event list screen.
//!
//! # Design
//! The list is a disposable snapshot of the server. Every refresh starts from
//! `Loading` and replaces the whole state with the outcome of one list-all
//! call. Refreshes may overlap; each one takes a ticket from a counter that is
//! bumped under the state lock, and a completing refresh only applies its
//! result if its ticket is still the newest. The state therefore always
//! reflects the most recently *issued* refresh, whatever order responses
//! arrive in.
//!
//! Deletes are not applied to the snapshot locally. A successful delete
//! triggers a fresh refresh and the row disappears once that completes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use event_core::Event;
use log::{debug, info};
use thiserror::Error;
use tokio::sync::{mpsc::UnboundedReceiver, watch};

use crate::notice::{Notice, Notifier, EVENT_DELETED};
use crate::service::{EventService, ServiceError};
use crate::state::StateHolder;
use crate::task::{TaskHandle, TaskSet};

/// Prefix for list errors caused by transport failures.
pub const CONNECTION_FAILED: &str = "connection failed";

/// What the list screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Error(String),
    Loaded(Vec<Event>),
}

impl ListState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Current rows; empty unless loaded.
    pub fn events(&self) -> &[Event] {
        match self {
            ListState::Loaded(events) => events,
            _ => &[],
        }
    }
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("event has no id")]
    MissingId,
}

fn list_error(err: &ServiceError) -> String {
    match err.application_message() {
        Some(message) => message.to_string(),
        None => format!("{CONNECTION_FAILED}: {err}"),
    }
}

struct Inner {
    service: EventService,
    state: StateHolder<ListState>,
    notifier: Notifier,
    tasks: TaskSet,
    latest: AtomicU64,
}

impl Inner {
    fn refresh(self: &Arc<Self>) -> TaskHandle {
        let mut ticket = 0;
        self.state.update(|state| {
            ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            *state = ListState::Loading;
            true
        });
        debug!("refresh #{ticket} issued");

        let inner = Arc::clone(self);
        self.tasks.spawn(async move {
            let next = match inner.service.list_events().await {
                Ok(events) => ListState::Loaded(events),
                Err(err) => ListState::Error(list_error(&err)),
            };
            let applied = inner.state.update(|state| {
                if inner.latest.load(Ordering::SeqCst) != ticket {
                    return false;
                }
                *state = next;
                true
            });
            if !applied {
                debug!("refresh #{ticket} superseded, result dropped");
            }
        })
    }

    fn delete(self: &Arc<Self>, id: String) -> TaskHandle {
        let inner = Arc::clone(self);
        self.tasks.spawn(async move {
            match inner.service.delete_event(&id).await {
                Ok(()) if !inner.state.is_disposed() => {
                    info!("deleted event {id}");
                    inner.refresh();
                    inner.notifier.send(Notice::info(EVENT_DELETED));
                }
                Ok(()) => {}
                Err(err) => {
                    if !inner.state.is_disposed() {
                        inner.notifier.send(Notice::from_failure(&err));
                    }
                }
            }
        })
    }
}

/// Owns the list state and the tasks that update it.
///
/// Must be created inside a Tokio runtime. Dropping the controller cancels
/// its in-flight tasks and freezes its state.
pub struct RefreshController {
    inner: Arc<Inner>,
}

impl RefreshController {
    /// Controller in the `Loading` state plus the stream of notices it emits.
    pub fn new(service: EventService) -> (Self, UnboundedReceiver<Notice>) {
        let (notifier, notices) = Notifier::channel();
        let controller = Self {
            inner: Arc::new(Inner {
                service,
                state: StateHolder::new(ListState::Loading),
                notifier,
                tasks: TaskSet::new(),
                latest: AtomicU64::new(0),
            }),
        };
        (controller, notices)
    }

    pub fn state(&self) -> ListState {
        self.inner.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.inner.state.subscribe()
    }

    /// Reload the list from the server.
    pub fn refresh(&self) -> TaskHandle {
        self.inner.refresh()
    }

    /// The screen regained focus.
    pub fn resume(&self) -> TaskHandle {
        debug!("list screen resumed");
        self.inner.refresh()
    }

    /// Delete `event` on the server, then refresh.
    pub fn delete(&self, event: &Event) -> Result<TaskHandle, ControllerError> {
        let id = event.id.clone().ok_or(ControllerError::MissingId)?;
        info!("deleting event {id}");
        Ok(self.inner.delete(id))
    }

    pub fn shutdown(&self) {
        self.inner.state.dispose();
        self.inner.tasks.shutdown();
    }
}

impl Drop for RefreshController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
