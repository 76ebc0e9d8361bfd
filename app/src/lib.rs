//! Async front end for the event service.
//!
//! # Overview
//! `event-core` only builds requests and parses responses. This crate adds
//! the pieces a UI needs on top: a `Transport` that performs the HTTP round
//! trip, an `EventService` with one async method per operation, and the two
//! screen controllers.
//!
//! # Design
//! - Controllers own their state in a `StateHolder`. Screens read snapshots
//!   or subscribe; only the controller's own tasks write.
//! - Every user action runs as a cancellable task. Shutting a controller down
//!   (or dropping it) cancels its tasks and freezes its state.
//! - Transient messages go out on an unbounded channel of `Notice`s returned
//!   alongside each controller.

pub mod form;
pub mod notice;
pub mod refresh;
pub mod service;
pub mod state;
pub mod task;
pub mod transport;

pub use form::{FormController, FormError, FormState};
pub use notice::{Notice, NoticeKind, Notifier};
pub use refresh::{ControllerError, ListState, RefreshController};
pub use service::{EventService, ServiceError};
pub use state::StateHolder;
pub use task::{TaskHandle, TaskSet};
pub use transport::{ReqwestTransport, Transport, TransportError};
