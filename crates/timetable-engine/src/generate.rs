//! Boundary with the external schedule generator.
//!
//! The generator receives the three catalogs and answers with a candidate
//! schedule. Nothing it returns is trusted: [`Timetable::accept_generated`]
//! rescans the proposal and rejects it whole on any conflict.
//!
//! [`Timetable::accept_generated`]: crate::timetable::Timetable::accept_generated

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TimetableError};
use crate::model::{Course, Day, Instructor, Room, ScheduleEntry};
use crate::time::ClockTime;

/// Catalogs sent to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub courses: Vec<Course>,
    pub instructors: Vec<Instructor>,
    pub rooms: Vec<Room>,
}

impl GenerationRequest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A successful generator answer: `{"schedule": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub schedule: Vec<ScheduleEntry>,
}

impl GenerationResponse {
    /// Parse a response body from the generator.
    ///
    /// A body of the form `{"error": "..."}` becomes [`TimetableError::Generation`]
    /// carrying that message; a body that is not JSON, lacks `schedule`, or holds
    /// entries that do not parse is reported as a malformed response.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| TimetableError::Generation(format!("malformed response: {}", e)))?;

        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(TimetableError::Generation(message.to_string()));
        }

        let Some(schedule) = value.get("schedule") else {
            return Err(TimetableError::Generation(
                "response did not contain a schedule".to_string(),
            ));
        };

        let schedule = Vec::<ScheduleEntry>::deserialize(schedule)
            .map_err(|e| TimetableError::Generation(format!("malformed schedule: {}", e)))?;
        Ok(Self { schedule })
    }
}

/// Anything that can propose a full schedule for a set of catalogs.
///
/// Implementations report transport and service failures as
/// [`TimetableError::Generation`]; the caller converts them into one message
/// and leaves the current schedule untouched.
pub trait ScheduleGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<ScheduleEntry>>;
}

impl<F> ScheduleGenerator for F
where
    F: Fn(&GenerationRequest) -> Result<Vec<ScheduleEntry>>,
{
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<ScheduleEntry>> {
        self(request)
    }
}

/// Offline stand-in for the generator: a fixed, conflict-free schedule over the
/// seed catalogs, ignoring the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureGenerator;

impl ScheduleGenerator for FixtureGenerator {
    fn generate(&self, _request: &GenerationRequest) -> Result<Vec<ScheduleEntry>> {
        tracing::debug!("serving fixture schedule");
        Ok(vec![
            fixture_entry("C101", "I001", "R1", Day::Monday, (9, 0), (10, 30)),
            fixture_entry("A401", "I001", "R1", Day::Wednesday, (9, 0), (11, 30)),
            fixture_entry("P303", "I002", "R2", Day::Tuesday, (10, 0), (12, 0)),
            fixture_entry("M201", "I003", "R2", Day::Friday, (10, 0), (11, 0)),
            fixture_entry("H110", "I004", "R4", Day::Wednesday, (13, 0), (14, 30)),
            fixture_entry("E210", "I004", "R3", Day::Tuesday, (14, 0), (16, 0)),
        ])
    }
}

fn fixture_entry(
    course: &str,
    instructor: &str,
    room: &str,
    day: Day,
    (start_h, start_m): (u16, u16),
    (end_h, end_m): (u16, u16),
) -> ScheduleEntry {
    ScheduleEntry {
        course_id: course.to_string(),
        instructor_id: instructor.to_string(),
        room_id: room.to_string(),
        day,
        start_time: ClockTime(start_h * 60 + start_m),
        end_time: ClockTime(end_h * 60 + end_m),
    }
}
