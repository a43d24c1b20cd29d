//! Event Grouper Library
//!
//! A small, stateless library for turning a batch of calendar event records into
//! per-day, time-ordered groups.
//!
//! # Architecture
//!
//! - Parses a JSON array of event records and validates each one
//! - Drops events of the `other` category
//! - Groups the rest by calendar date, keeping dates in first-seen order
//! - Orders each day's events by timestamp and writes a JSON document
//!
//! Loading is all-or-nothing: one invalid record fails the whole batch.
//!
//! # Example Usage
//!
//! ```no_run
//! use event_grouper::{EventProcessor, ProcessorConfig};
//!
//! let config = ProcessorConfig::new()
//!     .with_input("input.json")
//!     .with_output("output.json");
//!
//! let summary = EventProcessor::new(config).process().unwrap();
//! println!("{} events across {} dates", summary.grouped, summary.dates);
//! ```
//!
//! The stream-level functions in [`pipeline`] work over any reader and writer:
//!
//! ```
//! use event_grouper::{group_events, load_events};
//!
//! let input = br#"[{"datetime_utc": "2023-10-17T10:00:00", "event_type": "private",
//!                   "name": "Standup", "attendees": ["Alex"], "location": "zoom"}]"#;
//! let events = load_events(&input[..]).unwrap();
//! let grouped = group_events(&events);
//! assert_eq!(grouped.dates().collect::<Vec<_>>(), vec!["2023-10-17"]);
//! ```

// Public modules
pub mod config;
pub mod event;
pub mod generator;
pub mod grouping;
pub mod pipeline;
pub mod processor;
pub mod timestamp;
pub mod types;

// Re-export main types for convenience
pub use config::ProcessorConfig;
pub use event::{Event, EventRecord};
pub use generator::{generate_event, generate_events};
pub use grouping::{group_events, DateGroup, GroupedEvents};
pub use pipeline::{load_events, save_grouped_events, write_grouped_events};
pub use processor::{EventProcessor, ProcessSummary};
pub use timestamp::Timestamp;
pub use types::{ErrorKind, EventCategory, EventError, EventVenue, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty batch groups into an empty mapping
        let grouped = group_events(&[]);
        assert!(grouped.is_empty());
        assert!(!VERSION.is_empty());
    }
}
