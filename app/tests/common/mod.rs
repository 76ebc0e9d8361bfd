//! Scripted transport: every request is handed to the test, which decides
//! when and how it is answered.

#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use event_app::{EventService, Transport, TransportError};
use event_core::{EventClient, HttpRequest, HttpResponse};
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};

pub struct PendingCall {
    pub request: HttpRequest,
    reply: oneshot::Sender<Result<HttpResponse, TransportError>>,
}

impl PendingCall {
    pub fn respond(self, status: u16, body: impl Into<String>) {
        let _ = self.reply.send(Ok(HttpResponse::json(status, body)));
    }

    pub fn fail(self, diagnostic: &str) {
        let _ = self
            .reply
            .send(Err(TransportError::Connection(diagnostic.to_string())));
    }

    pub fn body_json(&self) -> Value {
        serde_json::from_str(self.request.body.as_deref().expect("request has a body"))
            .expect("request body is JSON")
    }
}

pub struct ScriptedTransport {
    calls: mpsc::UnboundedSender<PendingCall>,
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (reply, answer) = oneshot::channel();
        self.calls
            .send(PendingCall { request, reply })
            .map_err(|_| TransportError::Connection("script closed".to_string()))?;
        answer
            .await
            .unwrap_or_else(|_| Err(TransportError::Connection("no answer".to_string())))
    }
}

pub const BASE_URL: &str = "http://localhost:3000/";

pub fn service() -> (EventService, mpsc::UnboundedReceiver<PendingCall>) {
    let (calls, rx) = mpsc::unbounded_channel();
    let client = EventClient::new(BASE_URL).unwrap();
    (EventService::new(client, ScriptedTransport { calls }), rx)
}

pub async fn next_call(calls: &mut mpsc::UnboundedReceiver<PendingCall>) -> PendingCall {
    tokio::time::timeout(Duration::from_secs(5), calls.recv())
        .await
        .expect("timed out waiting for a request")
        .expect("transport dropped")
}

pub fn envelope(status: u16, message: &str, data: Value) -> String {
    json!({
        "status": status,
        "message": message,
        "data": data,
        "timestamp": "2025-01-01 00:00:00",
    })
    .to_string()
}

/// Server-shaped record with a numeric id.
pub fn event_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "date": "2025-12-15",
        "time": "19:00",
        "location": "Hall B",
        "description": null,
        "capacity": "",
        "status": "upcoming",
        "created_at": "2025-01-01 00:00:00",
        "updated_at": "2025-01-01 00:00:00",
    })
}
