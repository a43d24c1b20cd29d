//! Event model and its record representation
//!
//! [`Event`] is the validated, immutable in-memory form. [`EventRecord`] is the
//! document form used for input and output, with the wire field names.
//! Conversion from record to event is the only place category and venue text
//! is validated.

use crate::timestamp::Timestamp;
use crate::types::{EventCategory, EventError, EventVenue, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single validated calendar event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    timestamp: Timestamp,
    category: EventCategory,
    title: String,
    attendees: Vec<String>,
    venue: EventVenue,
}

impl Event {
    /// Create an event from raw category and venue text
    ///
    /// # Errors
    /// Returns [`EventError::InvalidEnumValue`] if either text is not a known
    /// member of its enumeration. No other field is checked.
    pub fn new(
        timestamp: Timestamp,
        category: &str,
        title: impl Into<String>,
        attendees: Vec<String>,
        venue: &str,
    ) -> Result<Self> {
        let category: EventCategory = category.parse()?;
        let venue: EventVenue = venue.parse()?;
        Ok(Self::from_parts(timestamp, category, title, attendees, venue))
    }

    /// Create an event from already-typed parts
    pub fn from_parts(
        timestamp: Timestamp,
        category: EventCategory,
        title: impl Into<String>,
        attendees: Vec<String>,
        venue: EventVenue,
    ) -> Self {
        Self {
            timestamp,
            category,
            title: title.into(),
            attendees,
            venue,
        }
    }

    /// Build an event from its record form
    ///
    /// # Errors
    /// Fails with a parse error if `datetime_utc` is not a valid date+time, or a
    /// validation error if `event_type` or `location` is unknown.
    pub fn from_record(record: &EventRecord) -> Result<Self> {
        let timestamp = Timestamp::parse(&record.datetime_utc)?;
        Self::new(
            timestamp,
            &record.event_type,
            record.name.clone(),
            record.attendees.clone(),
            &record.location,
        )
    }

    /// Convert to record form
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            datetime_utc: self.timestamp.to_iso_string(),
            event_type: self.category.as_str().to_string(),
            name: self.title.clone(),
            attendees: self.attendees.clone(),
            location: self.venue.as_str().to_string(),
        }
    }

    /// `YYYY-MM-DD` key of the calendar date this event falls on
    pub fn date_key(&self) -> String {
        self.timestamp.date().format("%Y-%m-%d").to_string()
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn attendees(&self) -> &[String] {
        &self.attendees
    }

    pub fn venue(&self) -> EventVenue {
        self.venue
    }
}

/// Document form of an event
///
/// Category and venue are kept as raw text here; they are validated when the
/// record is turned into an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub datetime_utc: String,
    pub event_type: String,
    pub name: String,
    pub attendees: Vec<String>,
    pub location: String,
}

impl EventRecord {
    /// Read a record out of a generic JSON value
    ///
    /// # Errors
    /// Returns a schema error if `value` is not an object, a field is missing,
    /// or a field has the wrong JSON type.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            EventError::InvalidRecord(format!("expected an object, found {}", json_type(value)))
        })?;

        Ok(Self {
            datetime_utc: required_str(object, "datetime_utc")?,
            event_type: required_str(object, "event_type")?,
            name: required_str(object, "name")?,
            attendees: required_str_array(object, "attendees")?,
            location: required_str(object, "location")?,
        })
    }
}

fn required<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value> {
    object.get(field).ok_or(EventError::MissingField(field))
}

fn required_str(object: &Map<String, Value>, field: &'static str) -> Result<String> {
    required(object, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(EventError::InvalidFieldType {
            field,
            expected: "string",
        })
}

fn required_str_array(object: &Map<String, Value>, field: &'static str) -> Result<Vec<String>> {
    let wrong_type = || EventError::InvalidFieldType {
        field,
        expected: "array of strings",
    };

    required(object, field)?
        .as_array()
        .ok_or_else(wrong_type)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(wrong_type))
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
