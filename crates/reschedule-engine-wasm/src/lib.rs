//! WASM bindings for reschedule-engine.
//!
//! Exposes the session compatibility check, compatible-span filtering, free-span
//! derivation, and duration math to the browser calendar modals via
//! `wasm-bindgen`. All complex types are passed as JSON strings using the
//! documents defined in `reschedule_engine::schema`.
//!
//! Each export is a thin wrapper over a plain Rust function returning
//! `Result<String, String>`, so the behavior can be tested off-wasm.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p reschedule-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/reschedule-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/reschedule_engine_wasm.wasm
//! ```

use reschedule_engine::freebusy::{DEFAULT_CLOSE, DEFAULT_OPEN};
use reschedule_engine::schema::{from_json, CompatibilityRequest, FreeSpansRequest, SpansRequest};
use reschedule_engine::time::{parse_date, parse_time_of_day};
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Native entry points
// ---------------------------------------------------------------------------

/// `"time-only"` or `"iso"` for a stored session time field.
pub fn detect_format_str(value: &str) -> Result<String, String> {
    reschedule_engine::detect_format(value)
        .map(|f| f.as_str().to_string())
        .map_err(|e| e.to_string())
}

/// Evaluate a `CompatibilityRequest` JSON document.
pub fn check_compatibility_json(request_json: &str) -> Result<String, String> {
    let request: CompatibilityRequest = from_json(request_json).map_err(|e| e.to_string())?;
    let response = request.evaluate().map_err(|e| e.to_string())?;
    to_json(&response)
}

/// Evaluate a `SpansRequest` JSON document.
pub fn compatible_spans_json(request_json: &str) -> Result<String, String> {
    let request: SpansRequest = from_json(request_json).map_err(|e| e.to_string())?;
    let response = request.evaluate().map_err(|e| e.to_string())?;
    to_json(&response)
}

/// Evaluate a `FreeSpansRequest` JSON document (default hours 08:00-20:00).
pub fn free_spans_json(request_json: &str) -> Result<String, String> {
    let request: FreeSpansRequest = from_json(request_json).map_err(|e| e.to_string())?;
    let open = parse_time_of_day(DEFAULT_OPEN).map_err(|e| e.to_string())?;
    let close = parse_time_of_day(DEFAULT_CLOSE).map_err(|e| e.to_string())?;
    let response = request.evaluate(open, close).map_err(|e| e.to_string())?;
    to_json(&response)
}

/// Signed minutes between two time values on `date`.
pub fn duration_minutes_str(start: &str, end: &str, date: &str) -> Result<i64, String> {
    let date = parse_date(date).map_err(|e| e.to_string())?;
    reschedule_engine::duration_minutes(start, end, date).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Detect whether a session time value is `"time-only"` or `"iso"`.
#[wasm_bindgen(js_name = "detectFormat")]
pub fn detect_format(value: &str) -> Result<String, JsValue> {
    detect_format_str(value).map_err(js_err)
}

/// Decide whether a session can keep its time at a new date/room.
///
/// `request_json` is a `CompatibilityRequest`:
/// `{session, target, freeSpans, existingSessions?, suggestStepMinutes?}`.
/// Returns a `CompatibilityResponse` JSON string whose `status` is `"keep"`,
/// `"noFreeSpan"` or `"conflict"`.
#[wasm_bindgen(js_name = "checkCompatibility")]
pub fn check_compatibility(request_json: &str) -> Result<String, JsValue> {
    check_compatibility_json(request_json).map_err(js_err)
}

/// Filter free spans down to those long enough for the session.
///
/// `request_json` is `{session, freeSpans}`; returns `{durationMinutes, spans}`.
#[wasm_bindgen(js_name = "compatibleSpans")]
pub fn compatible_spans(request_json: &str) -> Result<String, JsValue> {
    compatible_spans_json(request_json).map_err(js_err)
}

/// Derive a room's free spans from its bookings.
///
/// `request_json` is `{roomId, date, sessions, open?, close?}`; returns
/// `{roomId, date, spans}`.
#[wasm_bindgen(js_name = "freeSpans")]
pub fn free_spans(request_json: &str) -> Result<String, JsValue> {
    free_spans_json(request_json).map_err(js_err)
}

/// Minutes from `start` to `end` on `date` (`YYYY-MM-DD`). Negative when reversed.
#[wasm_bindgen(js_name = "durationMinutes")]
pub fn duration_minutes(start: &str, end: &str, date: &str) -> Result<i32, JsValue> {
    let minutes = duration_minutes_str(start, end, date).map_err(js_err)?;
    i32::try_from(minutes).map_err(|_| js_err(format!("Duration out of range: {}", minutes)))
}
