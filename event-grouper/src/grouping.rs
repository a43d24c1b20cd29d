//! Grouping of events by calendar date
//!
//! [`group_events`] is pure: it drops ignored categories, buckets the rest by the
//! date of their timestamp, and orders every bucket by timestamp text. Buckets
//! keep the order in which their date was first seen in the input.

use crate::event::{Event, EventRecord};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Events of one calendar date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    /// `YYYY-MM-DD`
    pub date: String,
    pub events: Vec<EventRecord>,
}

/// Insertion-ordered mapping from date key to that date's event records
///
/// Serializes as a JSON object whose keys appear in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedEvents {
    groups: Vec<DateGroup>,
    /// Date key → position in `groups`
    index: HashMap<String, usize>,
}

impl GroupedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the group for `date`, creating the group if needed
    pub fn push(&mut self, date: &str, record: EventRecord) {
        match self.index.get(date) {
            Some(&position) => self.groups[position].events.push(record),
            None => {
                self.index.insert(date.to_string(), self.groups.len());
                self.groups.push(DateGroup {
                    date: date.to_string(),
                    events: vec![record],
                });
            }
        }
    }

    /// Stable-sort every group ascending by timestamp text
    ///
    /// Fractions are written with 6 or 9 digits, or left out when zero. Text
    /// order still matches time order for timestamps that share an offset
    /// convention: fraction digits compare like decimals, and `+`/`-` sort
    /// before `.`.
    pub fn sort_groups(&mut self) {
        for group in &mut self.groups {
            group
                .events
                .sort_by(|a, b| a.datetime_utc.cmp(&b.datetime_utc));
        }
    }

    /// Records for `date`, if any event fell on it
    pub fn get(&self, date: &str) -> Option<&[EventRecord]> {
        self.index
            .get(date)
            .map(|&position| self.groups[position].events.as_slice())
    }

    /// Date keys in first-seen order
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.date.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateGroup> {
        self.groups.iter()
    }

    /// Number of dates
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of records across all dates
    pub fn total_events(&self) -> usize {
        self.groups.iter().map(|group| group.events.len()).sum()
    }
}

impl<'a> IntoIterator for &'a GroupedEvents {
    type Item = &'a DateGroup;
    type IntoIter = std::slice::Iter<'a, DateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl Serialize for GroupedEvents {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.date, &group.events)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroupedEvents {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupedVisitor;

        impl<'de> Visitor<'de> for GroupedVisitor {
            type Value = GroupedEvents;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from date to a list of event records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut grouped = GroupedEvents::new();
                while let Some((date, events)) = access.next_entry::<String, Vec<EventRecord>>()? {
                    for record in events {
                        grouped.push(&date, record);
                    }
                }
                Ok(grouped)
            }
        }

        deserializer.deserialize_map(GroupedVisitor)
    }
}

/// Group events by calendar date, dropping ignored categories
///
/// Groups appear in the order their date is first encountered. Within a group,
/// records are ordered by `datetime_utc` text; equal timestamps keep input order.
pub fn group_events(events: &[Event]) -> GroupedEvents {
    let mut grouped = GroupedEvents::new();

    for event in events {
        if event.category().is_ignored() {
            log::trace!("Skipping {} event at {}", event.category(), event.timestamp());
            continue;
        }
        grouped.push(&event.date_key(), event.to_record());
    }

    grouped.sort_groups();

    log::debug!(
        "Grouped {} of {} events into {} dates",
        grouped.total_events(),
        events.len(),
        grouped.len()
    );

    grouped
}
