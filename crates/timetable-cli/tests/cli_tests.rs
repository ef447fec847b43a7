//! Integration tests for the `timetable` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to drive the binary against a
//! state file in a temporary directory: seeding, generating, validating,
//! mutating, and checking that rejected changes leave the file untouched.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: a `timetable` command pointed at `state`, with logging silenced.
fn timetable(state: &Path) -> Command {
    let mut cmd = Command::cargo_bin("timetable").unwrap();
    cmd.arg("--state").arg(state).env("RUST_LOG", "off");
    cmd
}

/// Helper: a temp dir holding a seeded state file.
fn seeded() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("timetable.json");
    timetable(&state).arg("init").assert().success();
    (dir, state)
}

/// Helper: a temp dir holding a seeded state file with the fixture schedule.
fn generated() -> (TempDir, PathBuf) {
    let (dir, state) = seeded();
    timetable(&state)
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 6 entries"));
    (dir, state)
}

fn read_state(state: &Path) -> serde_json::Value {
    let json = std::fs::read_to_string(state).expect("state file must exist");
    serde_json::from_str(&json).expect("state file must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// init / generate / conflicts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn init_writes_seed_catalogs() {
    let (_dir, state) = seeded();

    let value = read_state(&state);
    assert_eq!(value["courses"].as_array().unwrap().len(), 6);
    assert_eq!(value["instructors"].as_array().unwrap().len(), 4);
    assert_eq!(value["rooms"].as_array().unwrap().len(), 4);
    assert!(value["schedule"].as_array().unwrap().is_empty());
}

#[test]
fn init_refuses_to_overwrite() {
    let (_dir, state) = seeded();

    timetable(&state)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    timetable(&state).args(["init", "--force"]).assert().success();
}

#[test]
fn generated_schedule_is_conflict_free() {
    let (_dir, state) = generated();

    timetable(&state)
        .arg("conflicts")
        .assert()
        .success()
        .stdout(predicate::str::contains("No conflicts."));

    timetable(&state)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("No issues."));
}

#[test]
fn missing_state_file_fails() {
    let dir = TempDir::new().unwrap();

    timetable(&dir.path().join("nope.json"))
        .arg("conflicts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read state file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// validate / save / move / remove
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_accepts_free_slot() {
    let (_dir, state) = seeded();

    timetable(&state)
        .args([
            "validate", "--course", "C101", "--instructor", "I001", "--room", "R1", "--day",
            "Monday", "--start", "09:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: C101 on Monday 9:00 AM-10:30 AM"));
}

#[test]
fn validate_reports_capacity_first() {
    let (_dir, state) = seeded();

    // Physics Lab (30) cannot hold World History (50); Saturday is also wrong.
    timetable(&state)
        .args([
            "validate", "--course", "H110", "--instructor", "I001", "--room", "R2", "--day",
            "sat", "--start", "06:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Room 'Physics Lab' capacity (30) is less than class size (50).",
        ));
}

#[test]
fn validate_rejects_malformed_time() {
    let (_dir, state) = seeded();

    timetable(&state)
        .args([
            "validate", "--course", "C101", "--instructor", "I001", "--room", "R1", "--day",
            "Monday", "--start", "9am",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid time"));
}

#[test]
fn save_then_list_unassigned() {
    let (_dir, state) = seeded();

    timetable(&state)
        .args([
            "save", "--course", "C101", "--instructor", "I001", "--room", "R1", "--day",
            "Monday", "--start", "09:00",
        ])
        .assert()
        .success();

    let value = read_state(&state);
    assert_eq!(value["schedule"][0]["endTime"], "10:30");

    timetable(&state)
        .arg("unassigned")
        .assert()
        .success()
        .stdout(predicate::str::contains("M201\tCalculus II"))
        .stdout(predicate::str::contains("C101").not());
}

#[test]
fn rejected_move_leaves_file_untouched() {
    let (_dir, state) = generated();
    let before = std::fs::read_to_string(&state).unwrap();

    // A401 holds Main Hall on Wednesday 09:00-11:30.
    timetable(&state)
        .args(["move", "C101", "--day", "Wednesday", "--start", "10:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Room 'Main Hall' is already booked for 'Advanced Algorithms'",
        ));

    assert_eq!(std::fs::read_to_string(&state).unwrap(), before);
}

#[test]
fn move_recomputes_end_time() {
    let (_dir, state) = generated();

    timetable(&state)
        .args(["move", "C101", "--day", "Monday", "--start", "10:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved C101 to Monday 10:30 AM-12:00 PM"));
}

#[test]
fn remove_unknown_course_fails() {
    let (_dir, state) = generated();

    timetable(&state)
        .args(["remove", "ZZZ"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No schedule entry for course 'ZZZ'"));

    timetable(&state).args(["remove", "C101"]).assert().success();
}

// ─────────────────────────────────────────────────────────────────────────────
// accept / layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn conflicting_proposal_is_rejected() {
    let (dir, state) = generated();
    let before = std::fs::read_to_string(&state).unwrap();
    let proposal = dir.path().join("proposal.json");
    std::fs::write(
        &proposal,
        r#"{"schedule":[
            {"courseId":"C101","instructorId":"I001","roomId":"R1","day":"Monday","startTime":"09:00","endTime":"10:00"},
            {"courseId":"M201","instructorId":"I003","roomId":"R1","day":"Monday","startTime":"09:30","endTime":"10:30"}
        ]}"#,
    )
    .unwrap();

    timetable(&state)
        .arg("accept")
        .arg(&proposal)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error generating schedule"))
        .stderr(predicate::str::contains("1 conflict(s)"));

    assert_eq!(std::fs::read_to_string(&state).unwrap(), before);
}

#[test]
fn error_body_is_reported() {
    let (dir, state) = seeded();
    let proposal = dir.path().join("proposal.json");
    std::fs::write(&proposal, r#"{"error":"AI Service Error: quota exceeded"}"#).unwrap();

    timetable(&state)
        .arg("accept")
        .arg(&proposal)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quota exceeded"));
}

#[test]
fn layout_prints_json_for_one_day() {
    let (_dir, state) = generated();

    let output = timetable(&state)
        .args(["layout", "--day", "Tuesday"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let items = layout.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["courseId"], "P303");
    assert_eq!(items[1]["courseId"], "E210");
    assert_eq!(items[0]["width"], 100.0);
}

#[test]
fn state_can_come_from_env() {
    let (_dir, state) = generated();

    Command::cargo_bin("timetable")
        .unwrap()
        .env("TIMETABLE_STATE", &state)
        .env("RUST_LOG", "off")
        .args(["conflicts", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("timetable")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("unrecognized")));
}

// ─────────────────────────────────────────────────────────────────────────────
// audit / conflicts with findings, assignments
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn audit_lists_issues_and_fails() {
    let (dir, state) = seeded();
    let proposal = dir.path().join("proposal.json");
    // Conflict-free, so accepted, but five catalog courses stay unscheduled.
    std::fs::write(
        &proposal,
        r#"{"schedule":[
            {"courseId":"C101","instructorId":"I001","roomId":"R1","day":"Monday","startTime":"09:00","endTime":"10:30"}
        ]}"#,
    )
    .unwrap();
    timetable(&state)
        .arg("accept")
        .arg(&proposal)
        .assert()
        .success()
        .stdout(predicate::str::contains("Accepted 1 entries"));

    timetable(&state)
        .arg("audit")
        .assert()
        .failure()
        .stdout(predicate::str::contains("M201: not scheduled"))
        .stdout(predicate::str::contains("C101").not())
        .stderr(predicate::str::contains("5 issue(s) found"));
}

#[test]
fn conflicts_lists_each_double_booking() {
    let dir = TempDir::new().unwrap();
    let state = dir.path().join("timetable.json");
    std::fs::write(
        &state,
        r#"{"schedule":[
            {"courseId":"C101","instructorId":"I001","roomId":"R1","day":"Monday","startTime":"09:00","endTime":"10:00"},
            {"courseId":"M201","instructorId":"I003","roomId":"R1","day":"Monday","startTime":"09:30","endTime":"10:30"}
        ]}"#,
    )
    .unwrap();

    timetable(&state)
        .arg("conflicts")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "room R1 double-booked on Monday at 09:30 (C101 09:00-10:00, M201 09:30-10:30)",
        ))
        .stdout(predicate::str::contains("1 conflict(s)"));
}

#[test]
fn assignments_group_rooms_in_week_order() {
    let (_dir, state) = generated();

    timetable(&state)
        .args(["assignments", "--by", "room"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Main Hall (R1)\n  Monday 9:00 AM-10:30 AM\tC101\tIntro to Computer Science\tI001\n  Wednesday 9:00 AM-11:30 AM\tA401",
        ));

    timetable(&state)
        .args(["assignments", "--by", "instructor"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dr. Ada Lovelace (I004)\n  Tuesday 2:00 PM-4:00 PM\tE210\tDigital Circuits\tR3\n  Wednesday 1:00 PM-2:30 PM\tH110",
        ));
}
