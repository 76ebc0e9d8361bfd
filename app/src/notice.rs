//! Transient user-visible messages (toasts, snackbars).

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::service::ServiceError;

pub const EVENT_CREATED: &str = "event created";
pub const EVENT_UPDATED: &str = "event updated";
pub const EVENT_DELETED: &str = "event deleted";
pub const REQUIRED_FIELDS: &str = "please fill in all required fields";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    /// Server message verbatim for application failures, a generic
    /// diagnostic for everything else.
    pub fn from_failure(err: &ServiceError) -> Self {
        match err.application_message() {
            Some(message) => Self::error(message),
            None => Self::error(format!("error: {err}")),
        }
    }
}

/// Sending half kept by a controller. Sends are fire-and-forget: a dropped
/// receiver just means nobody is showing notices any more.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, UnboundedReceiver<Notice>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }
}
