//! Async facade over `EventClient` and a `Transport`.
//!
//! Each method is one fresh round trip: build the request, execute it, parse
//! the response. There is no retry, no caching and no timeout override.

use std::sync::Arc;

use event_core::{
    ApiError, ClientConfig, Event, EventClient, EventStatus, HttpRequest, HttpResponse, Statistics,
};
use log::{debug, warn};
use thiserror::Error;

use crate::transport::{ReqwestTransport, Transport, TransportError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ServiceError {
    /// The server's own explanation, present only for application failures.
    pub fn application_message(&self) -> Option<&str> {
        match self {
            ServiceError::Api(err) => err.application_message(),
            ServiceError::Transport(_) => None,
        }
    }

    /// True for anything that is not an application failure: no response,
    /// an unreadable response, or a response without the expected payload.
    pub fn is_transport(&self) -> bool {
        self.application_message().is_none()
    }
}

/// The nine event operations as async calls.
#[derive(Clone)]
pub struct EventService {
    client: EventClient,
    transport: Arc<dyn Transport>,
}

impl EventService {
    pub fn new(client: EventClient, transport: impl Transport + 'static) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
        }
    }

    /// Service talking to the configured server over `reqwest`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ServiceError> {
        let client = EventClient::from_config(config)?;
        Ok(Self::new(client, ReqwestTransport::new()))
    }

    pub fn client(&self) -> &EventClient {
        &self.client
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ServiceError> {
        debug!("{} {}", request.method, request.url);
        match self.transport.execute(request).await {
            Ok(response) => {
                debug!("answered {} ({} bytes)", response.status, response.body.len());
                Ok(response)
            }
            Err(err) => {
                warn!("transport failure: {err}");
                Err(err.into())
            }
        }
    }

    fn logged<T>(result: Result<T, ApiError>) -> Result<T, ServiceError> {
        result.map_err(|err| {
            warn!("request failed: {err}");
            ServiceError::Api(err)
        })
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, ServiceError> {
        let response = self.round_trip(self.client.build_list_events()).await?;
        Self::logged(self.client.parse_list_events(response))
    }

    pub async fn get_event(&self, id: &str) -> Result<Event, ServiceError> {
        let response = self.round_trip(self.client.build_get_event(id)).await?;
        Self::logged(self.client.parse_get_event(response))
    }

    pub async fn list_events_by_date(&self, date: &str) -> Result<Vec<Event>, ServiceError> {
        let response = self
            .round_trip(self.client.build_list_events_by_date(date))
            .await?;
        Self::logged(self.client.parse_list_events_by_date(response))
    }

    pub async fn list_events_by_date_range(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Event>, ServiceError> {
        let response = self
            .round_trip(self.client.build_list_events_by_date_range(from, to))
            .await?;
        Self::logged(self.client.parse_list_events_by_date_range(response))
    }

    pub async fn list_events_by_status(
        &self,
        status: EventStatus,
    ) -> Result<Vec<Event>, ServiceError> {
        let response = self
            .round_trip(self.client.build_list_events_by_status(status))
            .await?;
        Self::logged(self.client.parse_list_events_by_status(response))
    }

    pub async fn get_statistics(&self, flag: i32) -> Result<Statistics, ServiceError> {
        let response = self.round_trip(self.client.build_get_statistics(flag)).await?;
        Self::logged(self.client.parse_get_statistics(response))
    }

    pub async fn create_event(&self, event: &Event) -> Result<Option<Event>, ServiceError> {
        let request = self.client.build_create_event(event)?;
        let response = self.round_trip(request).await?;
        Self::logged(self.client.parse_create_event(response))
    }

    pub async fn update_event(&self, id: &str, event: &Event) -> Result<Option<Event>, ServiceError> {
        let request = self.client.build_update_event(id, event)?;
        let response = self.round_trip(request).await?;
        Self::logged(self.client.parse_update_event(response))
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), ServiceError> {
        let response = self.round_trip(self.client.build_delete_event(id)).await?;
        Self::logged(self.client.parse_delete_event(response))
    }
}
