//! Event timestamps
//!
//! A timestamp is either naive (no offset, read as UTC) or carries the fixed
//! offset it was written with. The offset is never normalised away, so a value
//! parsed from text serializes back in the same convention.

use crate::types::{EventError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

/// Formats tried for offset-bearing text that is not strict RFC 3339
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Formats tried for text without an offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date+time of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// No offset given; semantically UTC
    Naive(NaiveDateTime),
    /// Offset kept exactly as given
    Offset(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Parse an ISO-8601 date+time
    ///
    /// Accepts `T` or space as separator, optional seconds and fraction, an
    /// optional `Z`/`±HH:MM` offset, and a bare `YYYY-MM-DD` (midnight).
    pub fn parse(text: &str) -> Result<Self> {
        // chrono reads second 60 as a leap second; it has no ISO-8601 text form here
        match Self::parse_lenient(text) {
            Some(ts) if ts.naive_local().nanosecond() < 1_000_000_000 => Ok(ts),
            _ => Err(EventError::TimestampParseError(text.to_string())),
        }
    }

    fn parse_lenient(text: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Timestamp::Offset(dt));
        }

        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(text, format) {
                return Some(Timestamp::Offset(dt));
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Some(Timestamp::Naive(naive));
            }
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(|date| Timestamp::Naive(date.and_time(NaiveTime::MIN)))
    }

    /// Calendar date in the timestamp's own offset
    pub fn date(&self) -> NaiveDate {
        match self {
            Timestamp::Naive(naive) => naive.date(),
            Timestamp::Offset(dt) => dt.date_naive(),
        }
    }

    /// Wall-clock date+time, without the offset
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(naive) => *naive,
            Timestamp::Offset(dt) => dt.naive_local(),
        }
    }

    /// Offset carried by this timestamp, if any
    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            Timestamp::Naive(_) => None,
            Timestamp::Offset(dt) => Some(*dt.offset()),
        }
    }

    /// ISO-8601 text form
    pub fn to_iso_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.naive_local();
        write!(f, "{}", local.format("%Y-%m-%dT%H:%M:%S"))?;

        let nanos = local.nanosecond();
        if nanos != 0 {
            if nanos % 1_000 == 0 {
                write!(f, ".{:06}", nanos / 1_000)?;
            } else {
                write!(f, ".{:09}", nanos)?;
            }
        }

        if let Timestamp::Offset(dt) = self {
            write!(f, "{}", dt.format("%:z"))?;
        }
        Ok(())
    }
}

impl FromStr for Timestamp {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self> {
        Timestamp::parse(s)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Timestamp::Naive(naive)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Timestamp::Offset(dt)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp::Offset(dt.fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_roundtrip_is_byte_exact() {
        for text in [
            "2023-10-17T10:00:00",
            "2023-10-17T23:59:59.123456",
            "2023-10-17T00:00:00.000000001",
        ] {
            let ts = Timestamp::parse(text).unwrap();
            assert!(ts.offset().is_none());
            assert_eq!(ts.to_string(), text);
        }
    }

    #[test]
    fn test_offset_is_preserved() {
        let ts = Timestamp::parse("2023-10-17T10:00:00+03:00").unwrap();
        assert_eq!(ts.offset(), FixedOffset::east_opt(3 * 3600));
        assert_eq!(ts.to_string(), "2023-10-17T10:00:00+03:00");

        let utc = Timestamp::parse("2023-10-17T10:00:00+00:00").unwrap();
        assert_eq!(utc.to_string(), "2023-10-17T10:00:00+00:00");
    }

    #[test]
    fn test_zulu_renders_as_numeric_offset() {
        let ts = Timestamp::parse("2023-10-17T10:00:00Z").unwrap();
        assert_eq!(ts.to_string(), "2023-10-17T10:00:00+00:00");
    }

    #[test]
    fn test_lenient_forms() {
        assert_eq!(
            Timestamp::parse("2023-10-17 10:00").unwrap().to_string(),
            "2023-10-17T10:00:00"
        );
        assert_eq!(
            Timestamp::parse("2023-10-17T10:00").unwrap().to_string(),
            "2023-10-17T10:00:00"
        );
        assert_eq!(
            Timestamp::parse("2023-10-17").unwrap().to_string(),
            "2023-10-17T00:00:00"
        );
        assert_eq!(
            Timestamp::parse("2023-10-17T10:00:00.5").unwrap().to_string(),
            "2023-10-17T10:00:00.500000"
        );
    }

    #[test]
    fn test_date_uses_local_offset() {
        // 23:30 at -05:00 is already the next day in UTC, but the local date is kept
        let ts = Timestamp::parse("2023-10-16T23:30:00-05:00").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2023, 10, 16).unwrap());
    }

    #[test]
    fn test_invalid_text() {
        for text in [
            "",
            "yesterday",
            "2023-13-01T00:00:00",
            "2023-10-17T25:00:00",
            "17.10.2023",
            "2023-10-17T23:59:60",
            "2016-12-31T23:59:60Z",
            "2016-12-31T23:59:60.5+00:00",
        ] {
            let err = Timestamp::parse(text).unwrap_err();
            assert!(matches!(err, EventError::TimestampParseError(_)), "{text}");
        }
    }
}
