//! Event domain model and lenient field parsing.
//!
//! This module defines the [`Event`] record as served by the backend, together with
//! the permissive parsers the filter and sort code relies on. Backend payloads are
//! loosely typed (identifiers and prices may arrive as numbers or strings, dates as
//! plain calendar dates or full timestamps), so every accessor degrades to `None`
//! instead of failing.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Display format for calendar dates (`25/12/2025`).
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Wire format for plain calendar dates.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single event as consumed by the list view-model and the detail view.
///
/// Free-text fields default to empty strings when absent so that substring
/// predicates never have to special-case missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque backend identifier.
    #[serde(alias = "_id", deserialize_with = "text_from_scalar")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Calendar date, `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default)]
    pub start_time: Option<TimeValue>,
    #[serde(default)]
    pub end_time: Option<TimeValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// Locale formatted price text, e.g. `"10,50"`.
    #[serde(default, deserialize_with = "optional_text_from_scalar")]
    pub price: Option<String>,
    /// Dress code.
    #[serde(default)]
    pub attire: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organizers: Vec<Organizer>,
    /// Image references (URLs).
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
}

/// A person or organization responsible for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Start or end time as sent by the backend.
///
/// Older records store minutes since midnight, newer ones store `HH:MM` text.
/// Fractional minutes are truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Minutes(#[serde(deserialize_with = "whole_minutes")] i64),
    Text(String),
}

impl TimeValue {
    /// Renders the time as `HH:MM`.
    ///
    /// Numeric values are interpreted as minutes since midnight; text is passed
    /// through trimmed.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Minutes(minutes) => {
                let minutes = minutes.rem_euclid(24 * 60);
                format!("{:02}:{:02}", minutes / 60, minutes % 60)
            }
            Self::Text(text) => text.trim().to_string(),
        }
    }
}

impl Event {
    /// Creates an event with the given identifier, title and date and every other
    /// field empty.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            date: date.into(),
            start_time: None,
            end_time: None,
            location: String::new(),
            price: None,
            attire: None,
            organizers: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Returns the event date normalized to a local calendar day.
    ///
    /// `None` when the date is missing or unparseable.
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }

    /// Returns the parsed price, or `None` when the price is absent or not numeric.
    #[must_use]
    pub fn parsed_price(&self) -> Option<f64> {
        self.price.as_deref().and_then(parse_price)
    }

    /// Formats the date as `dd/mm/yyyy`, falling back to the raw text.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.calendar_date().map_or_else(
            || self.date.clone(),
            |date| date.format(DISPLAY_DATE_FORMAT).to_string(),
        )
    }

    /// Formats the price for display.
    ///
    /// - unknown or missing: `"-"`
    /// - zero: `"Free"`
    /// - otherwise: two decimals with a comma separator (`"10,50"`)
    #[must_use]
    pub fn display_price(&self) -> String {
        match self.parsed_price() {
            None => "-".to_string(),
            Some(price) if price == 0.0 => "Free".to_string(),
            Some(price) => format!("{price:.2}").replace('.', ","),
        }
    }
}

/// Parses a calendar date from the formats the backend emits.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to the local day), and
/// anything whose first ten characters form a `YYYY-MM-DD` date.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Local).date_naive());
    }

    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, ISO_DATE_FORMAT).ok())
}

/// Parses a locale formatted price.
///
/// Commas are normalized to dots, surrounding whitespace is ignored, and the
/// longest leading numeric prefix is used so `"15 €"` parses as `15.0`. Text that
/// does not start with a number (`"R$ 20"`, `"abc"`) yields `None`, as does any
/// non-finite result.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");

    let end = normalized
        .char_indices()
        .find(|&(idx, c)| {
            let sign = idx == 0 && (c == '-' || c == '+');
            !(c.is_ascii_digit() || c == '.' || sign)
        })
        .map_or(normalized.len(), |(idx, _)| idx);

    // "1.234.5" stops being a number at the second dot
    let mut prefix = &normalized[..end];
    if let Some(first_dot) = prefix.find('.') {
        if let Some(second) = prefix[first_dot + 1..].find('.') {
            prefix = &prefix[..first_dot + 1 + second];
        }
    }

    prefix.parse::<f64>().ok().filter(|price| price.is_finite())
}

fn text_from_scalar<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    scalar_to_text(value).ok_or_else(|| serde::de::Error::custom("expected a string or number"))
}

fn optional_text_from_scalar<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_to_text(value).filter(|text| !text.trim().is_empty()))
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn whole_minutes<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|m| m.is_finite()).map(|m| m.trunc() as i64))
        .ok_or_else(|| serde::de::Error::custom("minutes out of range"))
}

fn scalar_to_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_comma_decimal_separator() {
        assert_eq!(parse_price("10,50"), Some(10.5));
        assert_eq!(parse_price(" 5 "), Some(5.0));
        assert_eq!(parse_price("15 €"), Some(15.0));
    }

    #[test]
    fn price_rejects_non_numeric_text() {
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("R$ 20"), None);
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("."), None);
    }

    #[test]
    fn price_stops_at_second_separator() {
        assert_eq!(parse_price("1.234,5"), Some(1.234));
    }

    #[test]
    fn calendar_date_handles_plain_and_prefixed_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 1);
        assert_eq!(parse_calendar_date("2025-06-01"), expected);
        assert_eq!(parse_calendar_date("2025-06-01 18:00"), expected);
        assert_eq!(parse_calendar_date("not a date"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn deserializes_loose_backend_payload() {
        let json = r#"{
            "_id": 42,
            "title": "Festa na Praia",
            "date": "2025-12-25",
            "startTime": 1140,
            "endTime": "23:30",
            "price": 10.5,
            "organizers": [{"name": "Ana"}],
            "images": ["https://cdn.example/a.jpg"]
        }"#;

        let event: Event = serde_json::from_str(json).expect("valid event");
        assert_eq!(event.id, "42");
        assert_eq!(event.price.as_deref(), Some("10.5"));
        let start = event.start_time.as_ref().map(TimeValue::display);
        let end = event.end_time.as_ref().map(TimeValue::display);
        assert_eq!(start.as_deref(), Some("19:00"));
        assert_eq!(end.as_deref(), Some("23:30"));
        assert_eq!(event.description, "");
        assert_eq!(event.organizers[0].name, "Ana");
    }

    #[test]
    fn null_or_blank_price_is_absent() {
        let event: Event =
            serde_json::from_str(r#"{"id": "a", "price": null}"#).expect("valid event");
        assert_eq!(event.price, None);

        let event: Event =
            serde_json::from_str(r#"{"id": "a", "price": "  "}"#).expect("valid event");
        assert_eq!(event.price, None);
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let json = r#"{
            "id": "a",
            "title": null,
            "description": null,
            "date": null,
            "location": null,
            "startTime": null,
            "attire": null,
            "organizers": [{"name": null, "email": "x@example.com"}],
            "images": null
        }"#;

        let event: Event = serde_json::from_str(json).expect("nulls tolerated");
        assert_eq!(event.title, "");
        assert_eq!(event.date, "");
        assert_eq!(event.calendar_date(), None);
        assert_eq!(event.location, "");
        assert_eq!(event.start_time, None);
        assert_eq!(event.organizers[0].name, "");
        assert!(event.images.is_empty());

        let event: Event =
            serde_json::from_str(r#"{"id": "b", "organizers": null}"#).expect("null list");
        assert!(event.organizers.is_empty());
    }

    #[test]
    fn fractional_minutes_are_truncated() {
        let event: Event = serde_json::from_str(r#"{"id": "a", "startTime": 1140.5}"#)
            .expect("float minutes");
        assert_eq!(event.start_time, Some(TimeValue::Minutes(1140)));
        assert_eq!(
            event.start_time.as_ref().map(TimeValue::display).as_deref(),
            Some("19:00")
        );
    }

    #[test]
    fn display_helpers_format_for_humans() {
        let mut event = Event::new("1", "Show", "2025-12-25");
        event.price = Some("10,5".to_string());
        assert_eq!(event.display_date(), "25/12/2025");
        assert_eq!(event.display_price(), "10,50");

        event.price = Some("0".to_string());
        assert_eq!(event.display_price(), "Free");

        event.price = None;
        event.date = "someday".to_string();
        assert_eq!(event.display_price(), "-");
        assert_eq!(event.display_date(), "someday");
    }
}
