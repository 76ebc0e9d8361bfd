//! Error types for the event API client.
//!
//! # Design
//! `Application` is the only variant that means "the server understood the
//! request and said no"; its message comes from the envelope and is meant
//! for the user as-is. Every other variant is a transport-level problem: the
//! response could not be interpreted at all.

use thiserror::Error;

/// Errors returned by `EventClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The envelope decoded but its status is not a success for the operation.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// Non-2xx HTTP status and a body that is not an envelope.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A success envelope arrived without the payload the operation needs.
    #[error("response carried no data")]
    MissingData,

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// The server-supplied message, if this is an application failure.
    pub fn application_message(&self) -> Option<&str> {
        match self {
            ApiError::Application { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_application(&self) -> bool {
        matches!(self, ApiError::Application { .. })
    }
}
