//! File-level event processor
//!
//! This module provides the primary interface for the library. [`EventProcessor`]
//! reads the input document from disk, groups its events, and replaces the
//! output document atomically.

use crate::config::ProcessorConfig;
use crate::event::Event;
use crate::grouping::{self, GroupedEvents};
use crate::pipeline;
use crate::types::{EventError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Counts reported by [`EventProcessor::process`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    /// Events read from the input document
    pub loaded: usize,
    /// Events written to the output document
    pub grouped: usize,
    /// Distinct dates in the output document
    pub dates: usize,
}

/// Groups the events of one input file into one output file
pub struct EventProcessor {
    config: ProcessorConfig,
}

impl EventProcessor {
    /// Create a processor for the given configuration
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Load and validate every event in the input document
    ///
    /// # Example
    /// ```no_run
    /// use event_grouper::{EventProcessor, ProcessorConfig};
    ///
    /// let processor = EventProcessor::new(ProcessorConfig::new().with_input("events.json"));
    /// let events = processor.load_events().unwrap();
    /// println!("Loaded {} events", events.len());
    /// ```
    pub fn load_events(&self) -> Result<Vec<Event>> {
        let path = &self.config.input;
        log::info!("Loading events from: {:?}", path);

        let file = File::open(path)?;
        let events = pipeline::load_events(file)?;

        log::info!("Loaded {} events from {:?}", events.len(), path);
        Ok(events)
    }

    /// Group events by date; see [`grouping::group_events`]
    pub fn group_events(&self, events: &[Event]) -> GroupedEvents {
        grouping::group_events(events)
    }

    /// Write grouped events to the output document
    ///
    /// The document goes to a temporary file next to the target first and is
    /// renamed into place once complete. An existing output file is only ever
    /// replaced by a complete document and keeps its permissions; a new one gets
    /// the usual umask-derived mode.
    ///
    /// Missing parent directories of the output path are created, so a missing
    /// directory is not reported as an error.
    pub fn save_grouped_events(&self, grouped: &GroupedEvents) -> Result<()> {
        let path = &self.config.output;
        log::info!("Saving {} dates to: {:?}", grouped.len(), path);

        let document = pipeline::render_document(grouped, self.config.indent)?;
        atomic_write(path, &document)?;

        log::info!("Saved grouped events to {:?}", path);
        Ok(())
    }

    /// Load, group and save
    pub fn process(&self) -> Result<ProcessSummary> {
        let events = self.load_events()?;
        let grouped = self.group_events(&events);
        self.save_grouped_events(&grouped)?;

        let summary = ProcessSummary {
            loaded: events.len(),
            grouped: grouped.total_events(),
            dates: grouped.len(),
        };
        log::info!(
            "Processed {} events: {} kept across {} dates",
            summary.loaded,
            summary.grouped,
            summary.dates
        );
        Ok(summary)
    }
}

/// Write `data` to `path` via a temporary file in the same directory
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        log::debug!("Creating output directory: {:?}", dir);
        fs::create_dir_all(dir)?;
    }

    // The temp file would otherwise stay owner-only (0600) after the rename
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Masked by the process umask on creation, like a plain `File::create`
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp_file = builder.tempfile_in(dir)?;
    if let Ok(metadata) = fs::metadata(path) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }

    temp_file.write_all(data)?;
    temp_file.flush()?;
    temp_file
        .persist(path)
        .map_err(|e| EventError::IoError(e.error))?;

    Ok(())
}
