//! In-memory stand-in for the remote event API.
//!
//! Serves the single `api.php` endpoint with the same envelope contract as
//! the real server: the operation is picked by HTTP method and query
//! parameters, every response body is `{status, message, data, timestamp}`,
//! and the HTTP status line mirrors the envelope status.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const ENDPOINT: &str = "/api.php";

pub const STATUSES: [&str; 4] = ["upcoming", "ongoing", "completed", "cancelled"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    pub message: String,
    pub data: Option<Value>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
struct EventInput {
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
    description: Option<String>,
    capacity: Option<u32>,
    status: Option<String>,
}

/// Fields accepted from a create or update body after validation.
struct ValidInput {
    title: String,
    date: String,
    time: String,
    location: String,
    description: Option<String>,
    capacity: Option<u32>,
    status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    pub id: Option<String>,
    pub date: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<String>,
    pub stats: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    events: BTreeMap<u64, Event>,
}

pub type Db = Arc<RwLock<Store>>;

type Reply = (StatusCode, Json<Envelope>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            ENDPOINT,
            get(read_events)
                .post(create_event)
                .put(update_event)
                .delete(delete_event),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn reply(status: StatusCode, message: impl Into<String>, data: Option<Value>) -> Reply {
    (
        status,
        Json(Envelope {
            status: status.as_u16(),
            message: message.into(),
            data,
            timestamp: now(),
        }),
    )
}

fn to_value<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn list_reply(mut events: Vec<Event>) -> Reply {
    events.sort_by(|a, b| (&a.date, &a.time, a.id).cmp(&(&b.date, &b.time, b.id)));
    debug!("returning {} events", events.len());
    reply(
        StatusCode::OK,
        "Events retrieved successfully",
        to_value(&events),
    )
}

async fn read_events(State(db): State<Db>, Query(query): Query<EventQuery>) -> Reply {
    let store = db.read().await;

    if query.stats.is_some() {
        let mut stats = serde_json::Map::new();
        stats.insert("total".to_string(), json!(store.events.len()));
        for status in STATUSES {
            let count = store.events.values().filter(|e| e.status == status).count();
            stats.insert(status.to_string(), json!(count));
        }
        return reply(
            StatusCode::OK,
            "Statistics retrieved successfully",
            Some(Value::Object(stats)),
        );
    }

    if let Some(raw) = &query.id {
        return match parse_id(raw).and_then(|id| store.events.get(&id)) {
            Some(event) => reply(StatusCode::OK, "Event retrieved successfully", to_value(event)),
            None => reply(StatusCode::NOT_FOUND, "Event not found", None),
        };
    }

    match (&query.date_from, &query.date_to) {
        (Some(from), Some(to)) => {
            let events = store
                .events
                .values()
                .filter(|e| e.date.as_str() >= from.as_str() && e.date.as_str() <= to.as_str())
                .cloned()
                .collect();
            return list_reply(events);
        }
        (Some(_), None) | (None, Some(_)) => {
            return reply(
                StatusCode::BAD_REQUEST,
                "Both date_from and date_to are required",
                None,
            );
        }
        (None, None) => {}
    }

    if let Some(date) = &query.date {
        let events = store
            .events
            .values()
            .filter(|e| &e.date == date)
            .cloned()
            .collect();
        return list_reply(events);
    }

    if let Some(status) = &query.status {
        if !STATUSES.contains(&status.as_str()) {
            return reply(StatusCode::BAD_REQUEST, "Invalid status value", None);
        }
        let events = store
            .events
            .values()
            .filter(|e| &e.status == status)
            .cloned()
            .collect();
        return list_reply(events);
    }

    list_reply(store.events.values().cloned().collect())
}

fn validate(body: &str) -> Result<ValidInput, Reply> {
    let input: EventInput = serde_json::from_str(body)
        .map_err(|_| reply(StatusCode::BAD_REQUEST, "Invalid JSON payload", None))?;

    let required = |name: &str, value: Option<String>| -> Result<String, Reply> {
        match value.map(|v| v.trim().to_string()) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(reply(
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {name}"),
                None,
            )),
        }
    };

    let title = required("title", input.title)?;
    let date = required("date", input.date)?;
    let time = required("time", input.time)?;
    let location = required("location", input.location)?;

    let status = input.status.unwrap_or_else(|| "upcoming".to_string());
    if !STATUSES.contains(&status.as_str()) {
        return Err(reply(StatusCode::BAD_REQUEST, "Invalid status value", None));
    }

    Ok(ValidInput {
        title,
        date,
        time,
        location,
        description: input.description.filter(|d| !d.trim().is_empty()),
        capacity: input.capacity,
        status,
    })
}

async fn create_event(State(db): State<Db>, body: String) -> Reply {
    let input = match validate(&body) {
        Ok(input) => input,
        Err(rejection) => return rejection,
    };

    let mut store = db.write().await;
    store.next_id += 1;
    let stamp = now();
    let event = Event {
        id: store.next_id,
        title: input.title,
        date: input.date,
        time: input.time,
        location: input.location,
        description: input.description,
        capacity: input.capacity,
        status: input.status,
        created_at: stamp.clone(),
        updated_at: stamp,
    };
    store.events.insert(event.id, event.clone());
    info!("created event {}", event.id);
    reply(StatusCode::CREATED, "Event created successfully", to_value(&event))
}

async fn update_event(
    State(db): State<Db>,
    Query(query): Query<EventQuery>,
    body: String,
) -> Reply {
    let Some(raw) = query.id else {
        return reply(StatusCode::BAD_REQUEST, "Event ID is required", None);
    };
    let input = match validate(&body) {
        Ok(input) => input,
        Err(rejection) => return rejection,
    };

    let mut store = db.write().await;
    let Some(event) = parse_id(&raw).and_then(|id| store.events.get_mut(&id)) else {
        return reply(StatusCode::NOT_FOUND, "Event not found", None);
    };
    event.title = input.title;
    event.date = input.date;
    event.time = input.time;
    event.location = input.location;
    event.description = input.description;
    event.capacity = input.capacity;
    event.status = input.status;
    event.updated_at = now();
    info!("updated event {}", event.id);
    reply(StatusCode::OK, "Event updated successfully", to_value(&*event))
}

async fn delete_event(State(db): State<Db>, Query(query): Query<EventQuery>) -> Reply {
    let Some(raw) = query.id else {
        return reply(StatusCode::BAD_REQUEST, "Event ID is required", None);
    };
    let mut store = db.write().await;
    match parse_id(&raw).and_then(|id| store.events.remove(&id)) {
        Some(event) => {
            info!("deleted event {}", event.id);
            reply(StatusCode::OK, "Event deleted successfully", None)
        }
        None => reply(StatusCode::NOT_FOUND, "Event not found", None),
    }
}
