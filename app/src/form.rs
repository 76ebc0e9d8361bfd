//! Controller behind the create/edit form.
//!
//! The form is in edit mode when it was opened for an event that has an id,
//! and in create mode otherwise. A submit validates the draft locally first;
//! an invalid draft never reaches the network.

use std::sync::Arc;

use event_core::{DraftError, Event, EventDraft};
use log::{info, warn};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::{mpsc::UnboundedReceiver, watch};

use crate::notice::{Notice, Notifier, EVENT_CREATED, EVENT_UPDATED, REQUIRED_FIELDS};
use crate::service::EventService;
use crate::state::StateHolder;
use crate::task::{TaskHandle, TaskSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    /// The server accepted the submit. Carries the echoed record, if any.
    Saved(Option<Event>),
    Failed(String),
}

impl FormState {
    /// Whether a submit may start from this state.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, FormState::Editing | FormState::Failed(_))
    }
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] DraftError),

    /// A submit is in flight or the form was already saved.
    #[error("form is not accepting submits")]
    NotEditable,

    #[error("form is closed")]
    Closed,
}

struct Inner {
    service: EventService,
    id: Option<String>,
    draft: Mutex<EventDraft>,
    state: StateHolder<FormState>,
    notifier: Notifier,
    tasks: TaskSet,
}

pub struct FormController {
    inner: Arc<Inner>,
}

impl FormController {
    /// Must be called inside a Tokio runtime.
    pub fn new(
        service: EventService,
        id: Option<String>,
        draft: EventDraft,
    ) -> (Self, UnboundedReceiver<Notice>) {
        let (notifier, notices) = Notifier::channel();
        let controller = Self {
            inner: Arc::new(Inner {
                service,
                id,
                draft: Mutex::new(draft),
                state: StateHolder::new(FormState::Editing),
                notifier,
                tasks: TaskSet::new(),
            }),
        };
        (controller, notices)
    }

    /// Empty form in create mode.
    pub fn blank(service: EventService) -> (Self, UnboundedReceiver<Notice>) {
        Self::new(service, None, EventDraft::empty())
    }

    /// Form seeded from `event`. Edit mode if the event has an id.
    pub fn for_event(service: EventService, event: &Event) -> (Self, UnboundedReceiver<Notice>) {
        Self::new(service, event.id.clone(), EventDraft::from_event(event))
    }

    pub fn is_edit_mode(&self) -> bool {
        self.inner.id.is_some()
    }

    pub fn id(&self) -> Option<&str> {
        self.inner.id.as_deref()
    }

    pub fn draft(&self) -> EventDraft {
        self.inner.draft.lock().clone()
    }

    pub fn edit(&self, f: impl FnOnce(&mut EventDraft)) {
        f(&mut self.inner.draft.lock());
    }

    pub fn state(&self) -> FormState {
        self.inner.state.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.inner.state.subscribe()
    }

    /// Validate the draft and send it as a create or an update.
    ///
    /// Only `Editing` and `Failed` accept a submit; anything else returns
    /// `FormError::NotEditable`. An invalid draft emits the required-fields
    /// notice and returns `FormError::Invalid` without touching the state.
    pub fn submit(&self) -> Result<TaskHandle, FormError> {
        if self.inner.state.is_disposed() {
            return Err(FormError::Closed);
        }
        if !self.inner.state.snapshot().accepts_submit() {
            return Err(FormError::NotEditable);
        }
        let event = match self.inner.draft.lock().to_event() {
            Ok(event) => event,
            Err(err) => {
                warn!("submit rejected: {err}");
                self.inner.notifier.send(Notice::error(REQUIRED_FIELDS));
                return Err(err.into());
            }
        };
        let started = self.inner.state.update(|state| {
            if !state.accepts_submit() {
                return false;
            }
            *state = FormState::Submitting;
            true
        });
        if !started {
            return Err(if self.inner.state.is_disposed() {
                FormError::Closed
            } else {
                FormError::NotEditable
            });
        }

        let inner = Arc::clone(&self.inner);
        Ok(self.inner.tasks.spawn(async move {
            let (result, done) = match &inner.id {
                None => (inner.service.create_event(&event).await, EVENT_CREATED),
                Some(id) => (inner.service.update_event(id, &event).await, EVENT_UPDATED),
            };
            match result {
                Ok(echo) => {
                    info!("{done}: {}", event.title);
                    if inner.state.set(FormState::Saved(echo)) {
                        inner.notifier.send(Notice::info(done));
                    }
                }
                Err(err) => {
                    let notice = Notice::from_failure(&err);
                    if inner.state.set(FormState::Failed(notice.text.clone())) {
                        inner.notifier.send(notice);
                    }
                }
            }
        }))
    }

    pub fn shutdown(&self) {
        self.inner.state.dispose();
        self.inner.tasks.shutdown();
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
