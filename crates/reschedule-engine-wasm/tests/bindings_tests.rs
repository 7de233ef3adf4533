//! Native tests for the JSON entry points behind the WASM exports.

use reschedule_engine_wasm::{
    check_compatibility_json, compatible_spans_json, detect_format_str, duration_minutes_str,
    free_spans_json,
};

#[test]
fn detect_format_labels() {
    assert_eq!(detect_format_str("09:00:00").unwrap(), "time-only");
    assert_eq!(detect_format_str("2025-03-01T09:00:00Z").unwrap(), "iso");
    assert!(detect_format_str("soon").unwrap_err().contains("Invalid time"));
}

#[test]
fn check_compatibility_keep() {
    let request = r#"{
        "session": {"id": "s1", "date": "2025-03-01", "startTime": "09:00:00", "endTime": "10:00:00", "roomId": "r1"},
        "target": {"date": "2025-03-01", "roomId": "r1"},
        "freeSpans": [{"startTime": "09:00:00", "endTime": "12:00:00"}]
    }"#;

    let out: serde_json::Value =
        serde_json::from_str(&check_compatibility_json(request).unwrap()).unwrap();

    assert_eq!(out["status"], "keep");
    assert_eq!(out["keep"], true);
    assert_eq!(out["span"]["startTime"], "09:00:00");
}

#[test]
fn check_compatibility_reports_bad_input() {
    let request = r#"{
        "session": {"id": "s1", "date": "2025-13-01", "startTime": "09:00", "endTime": "10:00", "roomId": "r1"},
        "target": {"date": "2025-03-01", "roomId": "r1"},
        "freeSpans": []
    }"#;
    let err = check_compatibility_json(request).unwrap_err();
    assert!(err.contains("2025-13-01"), "error should name the bad date: {err}");
}

#[test]
fn compatible_spans_filters() {
    let request = r#"{
        "session": {"id": "s1", "date": "2025-03-01", "startTime": "09:00", "endTime": "10:00", "roomId": "r1"},
        "freeSpans": [{"start": "08:00", "end": "08:30"}, {"start": "10:00", "end": "11:30"}]
    }"#;

    let out: serde_json::Value =
        serde_json::from_str(&compatible_spans_json(request).unwrap()).unwrap();

    assert_eq!(out["durationMinutes"], 60);
    assert_eq!(out["spans"].as_array().unwrap().len(), 1);
    assert_eq!(out["spans"][0]["startTime"], "10:00:00");
}

#[test]
fn free_spans_default_hours() {
    let request = r#"{"roomId": 3, "date": "2025-03-01", "sessions": [
        {"id": 1, "date": "2025-03-01", "startTime": "12:00", "endTime": "13:00", "roomId": 3}
    ]}"#;

    let out: serde_json::Value = serde_json::from_str(&free_spans_json(request).unwrap()).unwrap();

    assert_eq!(out["roomId"], "3");
    let spans = out["spans"].as_array().unwrap();
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0]["startTime"], "08:00:00");
    assert_eq!(spans[1]["endTime"], "20:00:00");
}

#[test]
fn duration_minutes_signed() {
    assert_eq!(duration_minutes_str("09:00", "10:15", "2025-03-01").unwrap(), 75);
    assert_eq!(duration_minutes_str("10:15", "09:00", "2025-03-01").unwrap(), -75);
    assert!(duration_minutes_str("09:00", "10:00", "March 1").is_err());
}
