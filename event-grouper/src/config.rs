//! Processor configuration types
//!
//! This module defines the configuration the file-level processor needs: where to
//! read from, where to write to, and how to lay out the output document.

use crate::pipeline::DEFAULT_INDENT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for [`crate::EventProcessor`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Input document (JSON array of event records)
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Output document (JSON object of date → records)
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Spaces per indentation level in the output document
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_input() -> PathBuf {
    PathBuf::from("input.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("output.json")
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            indent: default_indent(),
        }
    }
}

impl ProcessorConfig {
    /// Create a new processor configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the input document path
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Builder method: set the output document path
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Builder method: set the output indent width
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
