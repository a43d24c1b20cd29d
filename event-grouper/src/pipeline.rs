//! Stream-level pipeline: load → group → save
//!
//! These functions work over any `Read`/`Write` pair. File handling (paths,
//! atomic replacement) lives in [`crate::processor`].

use crate::event::{Event, EventRecord};
use crate::grouping::{group_events, GroupedEvents};
use crate::types::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::io::{BufReader, Read, Write};

/// Indent width of saved documents
pub const DEFAULT_INDENT: usize = 4;

/// Read a JSON array of event records and validate every one
///
/// Loading is all-or-nothing: the first record that fails conversion aborts the
/// call with that record's error.
pub fn load_events<R: Read>(source: R) -> Result<Vec<Event>> {
    let records: Vec<Value> = serde_json::from_reader(BufReader::new(source))?;
    log::debug!("Read {} raw records", records.len());

    records
        .iter()
        .enumerate()
        .map(|(index, value)| {
            EventRecord::from_value(value)
                .and_then(|record| Event::from_record(&record))
                .map_err(|e| {
                    log::error!("Record {} rejected: {}", index, e);
                    e
                })
        })
        .collect()
}

/// Write grouped events as a JSON document indented with four spaces
pub fn save_grouped_events<W: Write>(grouped: &GroupedEvents, sink: W) -> Result<()> {
    write_grouped_events(grouped, sink, DEFAULT_INDENT)
}

/// Write grouped events as a JSON document with the given indent width
///
/// The document is rendered completely before the first byte reaches `sink`.
/// Non-ASCII text is written as-is.
pub fn write_grouped_events<W: Write>(
    grouped: &GroupedEvents,
    mut sink: W,
    indent: usize,
) -> Result<()> {
    let document = render_document(grouped, indent)?;
    sink.write_all(&document)?;
    sink.flush()?;
    Ok(())
}

/// Load, group and save in one go
pub fn process<R: Read, W: Write>(source: R, sink: W) -> Result<GroupedEvents> {
    let events = load_events(source)?;
    let grouped = group_events(&events);
    save_grouped_events(&grouped, sink)?;
    Ok(grouped)
}

/// Render `value` as pretty JSON with `indent` spaces per level
pub(crate) fn render_document<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<Vec<u8>> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}
