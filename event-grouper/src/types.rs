//! Core types for the event grouper library
//!
//! This module defines the closed enumerations an event is classified by and the
//! single error type every library operation reports. Validation of category and
//! venue text happens here, through `FromStr`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for event grouper operations
pub type Result<T> = std::result::Result<T, EventError>;

/// Errors that can occur while loading, grouping or saving events
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {field} has wrong type: expected {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Failed to parse timestamp: {0:?}")]
    TimestampParseError(String),

    #[error("Invalid {kind} value: {value:?}")]
    InvalidEnumValue { kind: &'static str, value: String },

    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    #[error("Malformed document: {0}")]
    DocumentError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Broad classification of an [`EventError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A record is missing a field or has a field of the wrong shape
    Schema,
    /// A timestamp could not be parsed
    Parse,
    /// A value is outside its closed set of allowed values
    Validation,
    /// The underlying stream, file, or outer document failed
    Io,
}

impl EventError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventError::MissingField(_)
            | EventError::InvalidFieldType { .. }
            | EventError::InvalidRecord(_) => ErrorKind::Schema,
            EventError::TimestampParseError(_) => ErrorKind::Parse,
            EventError::InvalidEnumValue { .. } | EventError::InvalidDateRange { .. } => {
                ErrorKind::Validation
            }
            EventError::DocumentError(_) | EventError::IoError(_) => ErrorKind::Io,
        }
    }
}

/// Category of an event
///
/// `Other` marks events that are left out of the grouped output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Private,
    Meeting,
    Corporate,
    Other,
}

impl EventCategory {
    /// Every category, in declaration order
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Private,
        EventCategory::Meeting,
        EventCategory::Corporate,
        EventCategory::Other,
    ];

    /// Wire representation of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Private => "private",
            EventCategory::Meeting => "meeting",
            EventCategory::Corporate => "corporate",
            EventCategory::Other => "other",
        }
    }

    /// True if events of this category are dropped during grouping
    pub fn is_ignored(&self) -> bool {
        matches!(self, EventCategory::Other)
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        EventCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| EventError::InvalidEnumValue {
                kind: "event_type",
                value: s.to_string(),
            })
    }
}

/// Where (or over which service) an event takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventVenue {
    Zoom,
    Telegram,
    Office,
    Skype,
    Discord,
}

impl EventVenue {
    /// Every venue, in declaration order
    pub const ALL: [EventVenue; 5] = [
        EventVenue::Zoom,
        EventVenue::Telegram,
        EventVenue::Office,
        EventVenue::Skype,
        EventVenue::Discord,
    ];

    /// Wire representation of this venue
    pub fn as_str(&self) -> &'static str {
        match self {
            EventVenue::Zoom => "zoom",
            EventVenue::Telegram => "telegram",
            EventVenue::Office => "office",
            EventVenue::Skype => "skype",
            EventVenue::Discord => "discord",
        }
    }
}

impl fmt::Display for EventVenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventVenue {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        EventVenue::ALL
            .into_iter()
            .find(|venue| venue.as_str() == s)
            .ok_or_else(|| EventError::InvalidEnumValue {
                kind: "location",
                value: s.to_string(),
            })
    }
}
