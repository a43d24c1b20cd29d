//! Event Grouper CLI Application
//!
//! Command-line wrapper around the event-grouper library: reads an input
//! document of event records, groups them by date, and writes the output
//! document.

use anyhow::{Context, Result};
use clap::Parser;
use event_grouper::{EventProcessor, ProcessorConfig};
use std::path::PathBuf;

mod config;

/// Event Grouper - Group calendar events by date
#[derive(Parser, Debug)]
#[command(name = "event-grouper")]
#[command(about = "Group events by date.", long_about = None)]
#[command(version)]
struct Args {
    /// Input JSON file
    #[arg(short, long, value_name = "FILE", default_value = "input.json")]
    input: PathBuf,

    /// Output JSON file (missing parent directories are created)
    #[arg(short, long, value_name = "FILE", default_value = "output.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let app_config = match config::config_path_from_env() {
        Some(path) => config::load_config(&path)?,
        None => config::AppConfig::default(),
    };

    init_logging(app_config.logging.level.into());

    log::debug!("Event Grouper CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using event-grouper library v{}", event_grouper::VERSION);

    let mut processor_config = ProcessorConfig::new()
        .with_input(&args.input)
        .with_output(&args.output);
    if let Some(indent) = app_config.output.indent {
        processor_config = processor_config.with_indent(indent);
    }

    let summary = EventProcessor::new(processor_config)
        .process()
        .with_context(|| format!("Failed to group events from {:?} into {:?}", args.input, args.output))?;

    log::info!(
        "Wrote {} events across {} dates to {:?}",
        summary.grouped,
        summary.dates,
        args.output
    );

    Ok(())
}

/// Initialize logging; `RUST_LOG`, when set, overrides `level`
fn init_logging(level: log::LevelFilter) {
    use env_logger::Builder;
    use std::io::Write;

    let mut builder = Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
