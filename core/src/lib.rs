//! Synchronous API client core for the event service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `EventClient` is stateless; it holds only the endpoint URL.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Every response is an `ApiEnvelope`; success is decided by a single
//!   policy function, `is_success`.
//! - `EventDraft` carries the form rules (required fields, capacity and
//!   description normalization) so every front end applies the same ones.

pub mod client;
pub mod config;
pub mod draft;
pub mod envelope;
pub mod error;
pub mod http;
pub mod types;

pub use client::{EventClient, DEFAULT_STATS_FLAG};
pub use config::{ClientConfig, ConfigError};
pub use draft::{normalize_description, parse_capacity, DraftError, EventDraft, RequiredField};
pub use envelope::{is_success, ApiEnvelope, Operation};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Event, EventStatus, Statistics, UnknownStatus};
