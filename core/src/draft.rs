//! Editable form state for a single event, and the rules that turn it into
//! an `Event`.
//!
//! Every field is kept as the raw text the user typed. Conversion trims the
//! text, requires title, date, time and location, and maps optional fields to
//! `None` rather than to empty strings or zero.

use std::fmt;

use thiserror::Error;

use crate::types::{Event, EventStatus};

/// A field that must be non-blank before the draft can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Title,
    Date,
    Time,
    Location,
}

impl RequiredField {
    pub const ALL: [RequiredField; 4] = [
        RequiredField::Title,
        RequiredField::Date,
        RequiredField::Time,
        RequiredField::Location,
    ];

    /// Bit used for this field in `missing_mask`.
    pub fn bit(self) -> u32 {
        match self {
            RequiredField::Title => 1,
            RequiredField::Date => 1 << 1,
            RequiredField::Time => 1 << 2,
            RequiredField::Location => 1 << 3,
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequiredField::Title => "title",
            RequiredField::Date => "date",
            RequiredField::Time => "time",
            RequiredField::Location => "location",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw form input for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub capacity: String,
    pub status: EventStatus,
}

impl EventDraft {
    /// Empty draft for create mode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draft seeded from an existing record for edit mode.
    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            description: event.description.clone().unwrap_or_default(),
            capacity: event.capacity.map(|c| c.to_string()).unwrap_or_default(),
            status: event.status,
        }
    }

    /// Required fields that are blank after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.required(*field).trim().is_empty())
            .collect()
    }

    pub fn missing_mask(&self) -> u32 {
        self.missing_fields()
            .into_iter()
            .fold(0, |mask, field| mask | field.bit())
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }

    fn required(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::Title => &self.title,
            RequiredField::Date => &self.date,
            RequiredField::Time => &self.time,
            RequiredField::Location => &self.location,
        }
    }

    /// Build the outgoing record. The result never has an id.
    pub fn to_event(&self) -> Result<Event, DraftError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }
        Ok(Event {
            id: None,
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            description: normalize_description(&self.description),
            capacity: parse_capacity(&self.capacity),
            status: self.status,
            created_at: None,
            updated_at: None,
        })
    }
}

/// Parse free-form capacity text. Anything that is not a non-negative
/// integer means "no capacity specified".
pub fn parse_capacity(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// Blank descriptions become `None`; others are trimmed.
pub fn normalize_description(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
