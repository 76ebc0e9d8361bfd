//! Stateless HTTP request builder and response parser for the event API.
//!
//! # Design
//! `EventClient` holds only the endpoint URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round trip, keeping the
//! core deterministic and free of I/O dependencies.
//!
//! The API is a single endpoint; the operation is selected by HTTP method and
//! query parameters. Parsing reads the envelope first and lets the envelope
//! status decide the outcome through [`is_success`](crate::envelope::is_success),
//! falling back to the HTTP status only when the body is not an envelope.

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, DEFAULT_ENDPOINT};
use crate::envelope::{ApiEnvelope, Operation};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Event, EventPayload, EventStatus, Statistics};

/// Default flag value for the statistics query.
pub const DEFAULT_STATS_FLAG: i32 = 1;

/// Synchronous, stateless client for the event API.
#[derive(Debug, Clone)]
pub struct EventClient {
    endpoint: Url,
}

impl EventClient {
    /// Client for `{base_url}/api.php`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_endpoint(base_url, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(base_url: &str, endpoint: &str) -> Result<Self, ApiError> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        let endpoint = base
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;
        Ok(Self { endpoint })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_endpoint(&config.base_url, &config.endpoint)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn url(&self, params: &[(&str, &str)]) -> String {
        let mut url = self.endpoint.clone();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url.into()
    }

    fn get(&self, params: &[(&str, &str)]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(params),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_body(
        &self,
        method: HttpMethod,
        params: &[(&str, &str)],
        event: &Event,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&EventPayload::from(event))
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: self.url(params),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_list_events(&self) -> HttpRequest {
        self.get(&[])
    }

    pub fn build_get_event(&self, id: &str) -> HttpRequest {
        self.get(&[("id", id)])
    }

    pub fn build_list_events_by_date(&self, date: &str) -> HttpRequest {
        self.get(&[("date", date)])
    }

    pub fn build_list_events_by_date_range(&self, from: &str, to: &str) -> HttpRequest {
        self.get(&[("date_from", from), ("date_to", to)])
    }

    pub fn build_list_events_by_status(&self, status: EventStatus) -> HttpRequest {
        self.get(&[("status", status.as_str())])
    }

    pub fn build_get_statistics(&self, flag: i32) -> HttpRequest {
        let flag = flag.to_string();
        self.get(&[("stats", flag.as_str())])
    }

    /// The body never carries an id, even if `event.id` is set.
    pub fn build_create_event(&self, event: &Event) -> Result<HttpRequest, ApiError> {
        self.with_body(HttpMethod::Post, &[], event)
    }

    /// Full replace of the record identified by `id`. The body never carries
    /// an id; identity travels only in the query parameter.
    pub fn build_update_event(&self, id: &str, event: &Event) -> Result<HttpRequest, ApiError> {
        self.with_body(HttpMethod::Put, &[("id", id)], event)
    }

    pub fn build_delete_event(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(&[("id", id)]),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_events(&self, response: HttpResponse) -> Result<Vec<Event>, ApiError> {
        parse_list(Operation::ListAll, &response)
    }

    pub fn parse_get_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        success_data(Operation::GetById, &response)?.ok_or(ApiError::MissingData)
    }

    pub fn parse_list_events_by_date(&self, response: HttpResponse) -> Result<Vec<Event>, ApiError> {
        parse_list(Operation::ListByDate, &response)
    }

    pub fn parse_list_events_by_date_range(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Event>, ApiError> {
        parse_list(Operation::ListByDateRange, &response)
    }

    pub fn parse_list_events_by_status(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<Event>, ApiError> {
        parse_list(Operation::ListByStatus, &response)
    }

    pub fn parse_get_statistics(&self, response: HttpResponse) -> Result<Statistics, ApiError> {
        success_data(Operation::Statistics, &response)?.ok_or(ApiError::MissingData)
    }

    /// Returns the server's echo of the created record, if it sent one.
    pub fn parse_create_event(&self, response: HttpResponse) -> Result<Option<Event>, ApiError> {
        success_data(Operation::Create, &response)
    }

    pub fn parse_update_event(&self, response: HttpResponse) -> Result<Option<Event>, ApiError> {
        success_data(Operation::Update, &response)
    }

    pub fn parse_delete_event(&self, response: HttpResponse) -> Result<(), ApiError> {
        success_data::<Value>(Operation::Delete, &response).map(|_| ())
    }
}

/// Decode the envelope, using the HTTP status only to classify bodies that
/// are not envelopes.
fn read_envelope(response: &HttpResponse) -> Result<ApiEnvelope<Value>, ApiError> {
    match serde_json::from_str::<ApiEnvelope<Value>>(&response.body) {
        Ok(envelope) => Ok(envelope),
        Err(e) if response.is_2xx() => Err(ApiError::DeserializationError(e.to_string())),
        Err(_) => Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}

fn success_data<T: DeserializeOwned>(
    operation: Operation,
    response: &HttpResponse,
) -> Result<Option<T>, ApiError> {
    let envelope = read_envelope(response)?;
    if !envelope.is_success(operation) {
        debug!(
            "{operation:?} rejected with status {}: {}",
            envelope.status, envelope.message
        );
    }
    match envelope.into_data(operation)? {
        None | Some(Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|e| ApiError::DeserializationError(e.to_string())),
    }
}

fn parse_list(operation: Operation, response: &HttpResponse) -> Result<Vec<Event>, ApiError> {
    Ok(success_data(operation, response)?.unwrap_or_default())
}
