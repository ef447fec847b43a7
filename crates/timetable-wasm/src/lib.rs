//! WASM bindings for timetable-engine.
//!
//! Exposes the conflict scan, single-entry validation, grid layout, and audit
//! to JavaScript via `wasm-bindgen`. Schedules and catalogs cross the boundary
//! as JSON strings in the same camelCase shape the state file uses.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timetable-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/timetable_wasm.wasm
//! ```

use serde::Serialize;
use timetable_engine::{LayoutConfig, ScheduleEntry, Timetable, Violation};
use wasm_bindgen::prelude::*;

/// Result of `validateEntry`: `{"ok": true}` or the first violation found.
#[derive(Serialize)]
struct ValidationDto<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    violation: Option<&'a Violation>,
}

fn parse_schedule(json: &str) -> Result<Vec<ScheduleEntry>, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))
}

fn parse_state(json: &str) -> Result<Timetable, JsValue> {
    Timetable::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find every instructor and room conflict in a schedule.
///
/// `schedule_json` is a JSON array of schedule entries. Returns a JSON array of
/// `{type, id, day, time, conflictingEntries}` objects, instructor conflicts
/// first.
#[wasm_bindgen(js_name = "scanConflicts")]
pub fn scan_conflicts(schedule_json: &str) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    to_json(&timetable_engine::scan(&schedule))
}

/// Check one candidate entry against a full timetable state.
///
/// `state_json` holds `{courses, instructors, rooms, schedule}`. An existing
/// entry for the candidate's course is ignored, so edits validate in place.
#[wasm_bindgen(js_name = "validateEntry")]
pub fn validate_entry(candidate_json: &str, state_json: &str) -> Result<String, JsValue> {
    let candidate: ScheduleEntry = serde_json::from_str(candidate_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid entry JSON: {}", e)))?;
    let state = parse_state(state_json)?;

    let violation = state.check(&candidate);
    to_json(&ValidationDto {
        ok: violation.is_none(),
        message: violation.as_ref().map(|v| v.to_string()),
        violation: violation.as_ref(),
    })
}

/// Column layout for every entry of the week, with the default grid geometry
/// (07:00 anchor, 4.5 units per hour).
#[wasm_bindgen(js_name = "layoutWeek")]
pub fn layout_week(schedule_json: &str) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    to_json(&timetable_engine::layout_week(
        &schedule,
        &LayoutConfig::default(),
    ))
}

/// Render `HH:MM` as `h:MM AM/PM`. Unparseable input comes back unchanged.
#[wasm_bindgen(js_name = "formatTime12h")]
pub fn format_time_12h(time: &str) -> String {
    timetable_engine::to_display(time)
}

/// Every constraint the state's schedule breaks, as a JSON array of strings.
#[wasm_bindgen(js_name = "auditSchedule")]
pub fn audit_schedule(state_json: &str) -> Result<String, JsValue> {
    let state = parse_state(state_json)?;
    let messages: Vec<String> = state.audit().iter().map(|issue| issue.to_string()).collect();
    to_json(&messages)
}
