//! Synthetic input generator
//!
//! Writes a JSON array of random event records, suitable as input for the
//! `event-grouper` CLI.
//!
//! Usage:
//!   generate_events <output.json> [--count <n>] [--days <n>] [--seed <n>]
//!
//! Example:
//!   generate_events input.json --count 100 --days 7 --seed 42

use chrono::{Days, Utc};
use event_grouper::{generate_events, EventRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

fn print_usage() {
    eprintln!("Usage: generate_events <output.json> [--count <n>] [--days <n>] [--seed <n>]");
}

fn parse_number(flag: &str, value: Option<&String>) -> u64 {
    match value.and_then(|v| v.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("Error: {} needs a non-negative number", flag);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let output = PathBuf::from(&args[1]);
    let mut count = 10;
    let mut days = 7;
    let mut seed = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--count" => count = parse_number("--count", args.get(i + 1)),
            "--days" => days = parse_number("--days", args.get(i + 1)),
            "--seed" => seed = Some(parse_number("--seed", args.get(i + 1))),
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 2;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let to = Utc::now().date_naive();
    let from = to.checked_sub_days(Days::new(days)).unwrap_or(to);

    let events = match generate_events(&mut rng, from, to, count as usize) {
        Ok(events) => events,
        Err(e) => {
            eprintln!("Error generating events: {}", e);
            process::exit(1);
        }
    };

    let records: Vec<EventRecord> = events.iter().map(|e| e.to_record()).collect();
    let json = match serde_json::to_string_pretty(&records) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing events: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = fs::write(&output, json) {
        eprintln!("Error writing {:?}: {}", output, e);
        process::exit(1);
    }

    println!("Wrote {} events ({} .. {}) to {:?}", records.len(), from, to, output);
}
