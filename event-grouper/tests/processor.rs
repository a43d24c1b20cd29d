// End-to-end tests for the file-level processor
use chrono::NaiveDate;
use event_grouper::{
    generate_events, EventCategory, EventError, EventProcessor, ErrorKind, GroupedEvents,
    ProcessorConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_input(path: &Path, records: Value) {
    fs::write(path, serde_json::to_string_pretty(&records).unwrap()).unwrap();
}

fn processor_for(dir: &Path) -> EventProcessor {
    EventProcessor::new(
        ProcessorConfig::new()
            .with_input(dir.join("input.json"))
            .with_output(dir.join("output.json")),
    )
}

fn record(datetime: &str, event_type: &str, name: &str) -> Value {
    json!({
        "datetime_utc": datetime,
        "event_type": event_type,
        "name": name,
        "attendees": ["Alex", "Sergey"],
        "location": "telegram"
    })
}

#[test]
fn test_same_day_events_are_grouped_in_time_order() {
    let dir = tempdir().unwrap();
    let later = record("2023-10-17T11:00:00", "private", "later");
    let earlier = record("2023-10-17T10:00:00", "private", "earlier");
    write_input(&dir.path().join("input.json"), json!([later.clone(), earlier.clone()]));

    let summary = processor_for(dir.path()).process().unwrap();
    assert_eq!(summary.loaded, 2);
    assert_eq!(summary.grouped, 2);
    assert_eq!(summary.dates, 1);

    let output: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("output.json")).unwrap()).unwrap();
    assert_eq!(output, json!({ "2023-10-17": [earlier, later] }));
}

#[test]
fn test_two_dates_two_keys() {
    let dir = tempdir().unwrap();
    write_input(
        &dir.path().join("input.json"),
        json!([
            record("2023-10-16T09:30:00", "meeting", "a"),
            record("2023-10-17T14:00:00", "corporate", "b"),
        ]),
    );

    processor_for(dir.path()).process().unwrap();

    let text = fs::read_to_string(dir.path().join("output.json")).unwrap();
    let output: Value = serde_json::from_str(&text).unwrap();
    let keys: Vec<_> = output.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 2);
    assert!(text.find("2023-10-16").unwrap() < text.find("2023-10-17").unwrap());
}

#[test]
fn test_only_other_events_give_empty_object() {
    let dir = tempdir().unwrap();
    write_input(
        &dir.path().join("input.json"),
        json!([record("2023-10-17T10:00:00", "other", "ignored")]),
    );

    let summary = processor_for(dir.path()).process().unwrap();
    assert_eq!(summary.grouped, 0);
    assert_eq!(fs::read_to_string(dir.path().join("output.json")).unwrap(), "{}");
}

#[test]
fn test_invalid_event_type_fails_loading() {
    let dir = tempdir().unwrap();
    write_input(
        &dir.path().join("input.json"),
        json!([record("2023-10-17T10:00:00", "invalid_type", "Test Event")]),
    );

    let err = processor_for(dir.path()).load_events().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(err, EventError::InvalidEnumValue { kind: "event_type", .. }));
}

#[test]
fn test_failed_run_keeps_previous_output() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("output.json");
    fs::write(&output_path, "previous").unwrap();
    write_input(
        &dir.path().join("input.json"),
        json!([
            record("2023-10-17T10:00:00", "private", "ok"),
            record("2023-10-17T10:00:00", "private", "ok"),
            { "event_type": "private" },
        ]),
    );

    let err = processor_for(dir.path()).process().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert_eq!(fs::read_to_string(&output_path).unwrap(), "previous");
}

#[test]
fn test_failed_run_creates_no_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("input.json"), "[{\"datetime_utc\": ").unwrap();

    let err = processor_for(dir.path()).process().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!dir.path().join("output.json").exists());
}

#[test]
fn test_generated_batch_roundtrips_through_files() {
    let dir = tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(2023);
    let from = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();
    let to = NaiveDate::from_ymd_opt(2023, 10, 17).unwrap();
    let events = generate_events(&mut rng, from, to, 50).unwrap();

    let records: Vec<_> = events.iter().map(|e| e.to_record()).collect();
    write_input(&dir.path().join("input.json"), serde_json::to_value(&records).unwrap());

    let processor = processor_for(dir.path());
    let loaded = processor.load_events().unwrap();
    assert_eq!(loaded, events);

    let grouped = processor.group_events(&loaded);
    processor.save_grouped_events(&grouped).unwrap();

    let saved_text = fs::read_to_string(dir.path().join("output.json")).unwrap();
    let saved: GroupedEvents = serde_json::from_str(&saved_text).unwrap();
    assert_eq!(saved, grouped);

    let saved_value: Value = serde_json::from_str(&saved_text).unwrap();
    assert_eq!(saved_value, serde_json::to_value(&grouped).unwrap());

    let others = events
        .iter()
        .filter(|e| e.category() == EventCategory::Other)
        .count();
    assert_eq!(grouped.total_events(), events.len() - others);

    for group in &grouped {
        assert!(!group.events.is_empty());
        assert!(group
            .events
            .windows(2)
            .all(|pair| pair[0].datetime_utc <= pair[1].datetime_utc));
        assert!(group.events.iter().all(|r| r.event_type != "other"));
        assert!(group.events.iter().all(|r| r.datetime_utc.starts_with(&group.date)));
    }
}

#[test]
fn test_custom_indent_from_config() {
    let dir = tempdir().unwrap();
    write_input(
        &dir.path().join("input.json"),
        json!([record("2023-10-17T10:00:00", "meeting", "a")]),
    );

    let processor = EventProcessor::new(
        ProcessorConfig::new()
            .with_input(dir.path().join("input.json"))
            .with_output(dir.path().join("out/grouped.json"))
            .with_indent(2),
    );
    processor.process().unwrap();

    let text = fs::read_to_string(dir.path().join("out/grouped.json")).unwrap();
    assert!(text.starts_with("{\n  \"2023-10-17\""));
}
