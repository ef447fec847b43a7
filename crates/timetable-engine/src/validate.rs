//! Gate a single proposed entry against the catalogs and the rest of the schedule.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. course, room, and instructor ids resolve
//! 2. the room holds the class
//! 3. the instructor is available for the whole class that day
//! 4. no other entry on the same day overlaps it in the same room, or with the
//!    same instructor
//!
//! The entry being edited is recognised by its `course_id` and skipped, so an
//! entry can always be saved back into its own slot.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogIndex;
use crate::model::{AvailabilityWindow, Course, Day, Instructor, Room, ScheduleEntry};
use crate::time::ClockTime;

/// Why a candidate entry was rejected. `Display` is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Violation {
    #[error("Course not found.")]
    CourseNotFound,

    #[error("Room not found.")]
    RoomNotFound,

    #[error("Instructor not found.")]
    InstructorNotFound,

    #[error("Conflict: Room '{room}' capacity ({capacity}) is less than class size ({class_size}).")]
    Capacity {
        room: String,
        capacity: u32,
        class_size: u32,
    },

    #[error("Conflict: {instructor} is not available on {day}.")]
    Unavailable { instructor: String, day: Day },

    #[error(
        "Conflict: Class time is outside {instructor}'s availability ({}-{}).",
        .window_start.to_12_hour(),
        .window_end.to_12_hour()
    )]
    OutsideAvailability {
        instructor: String,
        window_start: ClockTime,
        window_end: ClockTime,
    },

    #[error("Conflict: Room '{room}' is already booked for '{other_course}' at this time.")]
    RoomDoubleBooked { room: String, other_course: String },

    #[error(
        "Conflict: Instructor '{instructor}' is already teaching '{other_course}' at this time."
    )]
    InstructorDoubleBooked {
        instructor: String,
        other_course: String,
    },
}

impl Violation {
    /// True for the unresolved-id cases, as opposed to constraint violations.
    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            Violation::CourseNotFound | Violation::RoomNotFound | Violation::InstructorNotFound
        )
    }
}

/// Validate `candidate` against `all_entries` and the three catalogs.
///
/// Builds a [`CatalogIndex`] for this call; use [`validate_with`] when an index
/// is already at hand. Returns `None` when the candidate may be committed.
pub fn validate(
    candidate: &ScheduleEntry,
    all_entries: &[ScheduleEntry],
    courses: &[Course],
    rooms: &[Room],
    instructors: &[Instructor],
) -> Option<Violation> {
    let index = CatalogIndex::new(courses, rooms, instructors);
    validate_with(candidate, all_entries, &index)
}

/// Validate `candidate` against a prebuilt catalog index.
pub fn validate_with(
    candidate: &ScheduleEntry,
    all_entries: &[ScheduleEntry],
    index: &CatalogIndex<'_>,
) -> Option<Violation> {
    let placement = match check_placement(candidate, index) {
        Ok(placement) => placement,
        Err(violation) => return Some(violation),
    };

    all_entries
        .iter()
        .filter(|other| other.course_id != candidate.course_id && other.day == candidate.day)
        .filter(|other| candidate.overlaps(other))
        .find_map(|other| {
            if other.room_id == candidate.room_id {
                Some(Violation::RoomDoubleBooked {
                    room: placement.room.name.clone(),
                    other_course: index.course_name(&other.course_id).to_string(),
                })
            } else if other.instructor_id == candidate.instructor_id {
                Some(Violation::InstructorDoubleBooked {
                    instructor: placement.instructor.name.clone(),
                    other_course: index.course_name(&other.course_id).to_string(),
                })
            } else {
                None
            }
        })
}

/// The room and instructor records a valid entry points at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Placement<'a> {
    pub room: &'a Room,
    pub instructor: &'a Instructor,
}

/// Everything except the overlap scan: references, capacity, availability.
pub(crate) fn check_placement<'a>(
    candidate: &ScheduleEntry,
    index: &CatalogIndex<'a>,
) -> Result<Placement<'a>, Violation> {
    let course = index
        .course(&candidate.course_id)
        .ok_or(Violation::CourseNotFound)?;
    let room = index
        .room(&candidate.room_id)
        .ok_or(Violation::RoomNotFound)?;
    let instructor = index
        .instructor(&candidate.instructor_id)
        .ok_or(Violation::InstructorNotFound)?;

    if room.capacity < course.class_size {
        return Err(Violation::Capacity {
            room: room.name.clone(),
            capacity: room.capacity,
            class_size: course.class_size,
        });
    }

    if let Some(violation) = check_availability(candidate, instructor) {
        return Err(violation);
    }

    Ok(Placement {
        room,
        instructor,
    })
}

fn check_availability(candidate: &ScheduleEntry, instructor: &Instructor) -> Option<Violation> {
    let Some((window_start, window_end)) = instructor
        .window_for(candidate.day)
        .and_then(AvailabilityWindow::bounds)
    else {
        return Some(Violation::Unavailable {
            instructor: instructor.name.clone(),
            day: candidate.day,
        });
    };

    if candidate.start_time < window_start || candidate.end_time > window_end {
        return Some(Violation::OutsideAvailability {
            instructor: instructor.name.clone(),
            window_start,
            window_end,
        });
    }

    None
}
