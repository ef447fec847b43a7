//! # timetable-engine
//!
//! Conflict detection and validation for weekly class timetables.
//!
//! A timetable assigns each course one slot: an instructor, a room, a day
//! (Monday through Saturday), and a start/end time. This crate decides whether
//! such assignments are consistent and lays simultaneous entries out side by
//! side for display. It does not search for a conflict-free schedule; it only
//! detects and gates.
//!
//! ## Modules
//!
//! - [`time`] - `HH:MM` parsing, minute arithmetic, 12-hour display
//! - [`model`] - courses, instructors, rooms, and schedule entries
//! - [`catalog`] - read-only lookup by id over the catalogs
//! - [`conflict`] - scan a whole schedule for double-booked instructors and rooms
//! - [`validate`] - gate one proposed entry against everything else
//! - [`layout`] - column layout for overlapping entries on a day
//! - [`assignments`] - per-instructor and per-room views in week order
//! - [`audit`] - report every constraint a schedule breaks
//! - [`timetable`] - catalogs + schedule with validated mutations
//! - [`generate`] - boundary with an external schedule generator
//! - [`defaults`] - seed catalogs and grid rows
//! - [`error`] - Error types

pub mod assignments;
pub mod audit;
pub mod catalog;
pub mod conflict;
pub mod defaults;
pub mod error;
pub mod generate;
pub mod layout;
pub mod model;
pub mod time;
pub mod timetable;
pub mod validate;

pub use assignments::{by_instructor, by_room, in_week_order};
pub use audit::{audit, AuditIssue};
pub use catalog::CatalogIndex;
pub use conflict::{scan, Conflict, ConflictKind};
pub use error::TimetableError;
pub use generate::{FixtureGenerator, GenerationRequest, GenerationResponse, ScheduleGenerator};
pub use layout::{layout_day, layout_week, EntryLayout, LayoutConfig};
pub use model::{AvailabilityWindow, Course, Day, Instructor, Room, ScheduleEntry};
pub use time::{end_time_for, to_display, to_minutes, ClockTime};
pub use timetable::Timetable;
pub use validate::{validate, validate_with, Violation};
