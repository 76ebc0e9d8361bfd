//! Response envelope and the success policy.
//!
//! # Design
//! Every response from the API is wrapped in the same envelope. Whether an
//! envelope counts as success depends on the operation: create answers `201`,
//! everything else answers `200`. That rule lives in [`is_success`] and
//! nowhere else, so callers never compare status codes themselves.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The nine remote operations the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListAll,
    GetById,
    ListByDate,
    ListByDateRange,
    ListByStatus,
    Statistics,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// The only envelope status this operation accepts as success.
    pub fn success_status(self) -> u16 {
        match self {
            Operation::Create => 201,
            _ => 200,
        }
    }
}

/// Decide whether `status` is a success for `operation`.
pub fn is_success(operation: Operation, status: u16) -> bool {
    status == operation.success_status()
}

/// Generic wrapper the server puts around every payload.
///
/// `data` is only meaningful when the status is a success for the operation
/// that produced it. `message` is shown verbatim to the user on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: u16,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self, operation: Operation) -> bool {
        is_success(operation, self.status)
    }

    /// Unwrap the payload of a successful envelope, or turn the server's
    /// message into an application error.
    pub fn into_data(self, operation: Operation) -> Result<Option<T>, ApiError> {
        if self.is_success(operation) {
            Ok(self.data)
        } else {
            Err(ApiError::Application {
                status: self.status,
                message: self.message,
            })
        }
    }
}
