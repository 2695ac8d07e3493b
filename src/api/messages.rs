//! Request and response bodies of the events backend.
//!
//! The backend is loosely typed: the "more pages" indicator may arrive as a boolean,
//! a number or a string, under one of several names, and single-event endpoints may
//! or may not wrap the record in an envelope. These types absorb that variance so the
//! rest of the crate only sees [`EventPage`] and [`Event`].

use crate::domain::{Event, Organizer, TimeValue};
use serde::{Deserialize, Deserializer, Serialize};

/// One page of the event listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    /// Events on this page, in server order.
    #[serde(default)]
    pub events: Vec<Event>,

    /// Server indicator that another page exists.
    ///
    /// Never inferred from the page size; a missing indicator means "no more".
    #[serde(
        default,
        rename = "hasMore",
        alias = "has_more",
        alias = "hasNextPage",
        deserialize_with = "truthy"
    )]
    pub has_more: bool,
}

impl EventPage {
    #[must_use]
    pub const fn new(events: Vec<Event>, has_more: bool) -> Self {
        Self { events, has_more }
    }
}

/// Query string of `GET /api/events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
}

/// Body of `POST /api/events` and `PUT /api/events/<id>`.
///
/// Images are referenced by URL; uploading the files themselves is the storage
/// service's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<TimeValue>,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attire: Option<String>,
    #[serde(default)]
    pub organizers: Vec<Organizer>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            location: event.location.clone(),
            price: event.price.clone(),
            attire: event.attire.clone(),
            organizers: event.organizers.clone(),
            images: event.images.clone(),
        }
    }
}

/// Single-event response, bare or wrapped in `{"event": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EventEnvelope {
    Wrapped { event: Event },
    Bare(Event),
}

impl EventEnvelope {
    pub(crate) fn into_event(self) -> Event {
        match self {
            Self::Wrapped { event } | Self::Bare(event) => event,
        }
    }
}

/// Interprets a JSON value the way a JavaScript condition would.
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => flag,
        serde_json::Value::Number(number) => {
            number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan())
        }
        serde_json::Value::String(text) => !text.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    })
}
