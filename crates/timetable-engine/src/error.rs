//! Error types for timetable-engine operations.

use thiserror::Error;

use crate::validate::Violation;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid time '{0}': expected HH:MM between 00:00 and 23:59")]
    InvalidTime(String),

    #[error("Time out of range: {minutes} minutes past midnight")]
    TimeOutOfRange { minutes: u32 },

    #[error("No schedule entry for course '{0}'")]
    EntryNotFound(String),

    #[error("Course not found: {0}")]
    CourseNotFound(String),

    /// A manual mutation failed the single-entry validator.
    #[error("{0}")]
    Rejected(Violation),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Generated schedule has {count} conflict(s); keeping the current schedule")]
    GeneratedConflicts { count: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
