//! Domain types for the event API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently of
//! the mock-server crate; integration tests catch schema drift.
//!
//! The server is loose about JSON scalar types: ids and capacities may arrive
//! as numbers or as numeric strings, and an unset capacity may arrive as `""`.
//! Decoding accepts all of those, while encoding always emits the canonical
//! form and omits unset optional fields entirely.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// Every status, in the order a picker presents them.
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Upcoming,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string is not one of the four wire names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for EventStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A single event as exchanged with the server.
///
/// `id` is absent until the server has assigned one. `created_at` and
/// `updated_at` are stamped by the server and never sent back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<String>,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_capacity"
    )]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: EventStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Request body for create and update.
///
/// Borrowed view of an `Event` that has no `id` or server timestamps, so an
/// outgoing body can never carry identity. Identity for update travels in the
/// `id` query parameter only.
#[derive(Debug, Serialize)]
pub(crate) struct EventPayload<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub time: &'a str,
    pub location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub status: EventStatus,
}

impl<'a> From<&'a Event> for EventPayload<'a> {
    fn from(event: &'a Event) -> Self {
        Self {
            title: &event.title,
            date: &event.date,
            time: &event.time,
            location: &event.location,
            description: event.description.as_deref(),
            capacity: event.capacity,
            status: event.status,
        }
    }
}

/// Aggregate figures returned by the statistics query.
///
/// The shape is owned by the server; the client only offers key lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statistics(pub serde_json::Map<String, serde_json::Value>);

impl Statistics {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Text(s)) if s.is_empty() => None,
        Some(Scalar::Text(s)) => Some(s),
    })
}

/// A null status reads as the default, like a missing one.
fn lenient_status<'de, D>(deserializer: D) -> Result<EventStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<EventStatus>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_capacity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(n)) => u32::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("capacity out of range: {n}"))),
        Some(Scalar::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<u32>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid capacity: {s:?}")))
        }
    }
}
