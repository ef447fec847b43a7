//! Full re-verification of a schedule, reporting every problem found.
//!
//! Where [`validate`](crate::validate) stops at the first violation of one
//! candidate, an audit walks the whole schedule and lists everything a
//! generated proposal was asked to get right: one entry per course, resolvable
//! references, qualified instructors, room capacity, availability, end times
//! that match the course duration, the working day, full coverage of the
//! course catalog, and no double booking.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogIndex;
use crate::conflict::{scan, Conflict};
use crate::defaults::{WORKDAY_END, WORKDAY_START};
use crate::model::{Course, Instructor, Room, ScheduleEntry};
use crate::time::ClockTime;
use crate::validate::{check_placement, Violation};

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AuditIssue {
    #[error("{course_id}: scheduled more than once")]
    DuplicateEntry { course_id: String },

    #[error("{course_id}: {violation}")]
    Placement {
        course_id: String,
        violation: Violation,
    },

    #[error("{course_id}: instructor {instructor_id} is not assigned to this course")]
    NotAssigned {
        course_id: String,
        instructor_id: String,
    },

    #[error("{course_id}: runs {actual_minutes} min but the course lasts {expected_minutes} min")]
    DurationMismatch {
        course_id: String,
        expected_minutes: u32,
        actual_minutes: u32,
    },

    #[error("{course_id}: {start}-{end} falls outside the working day")]
    OutsideWorkday {
        course_id: String,
        start: ClockTime,
        end: ClockTime,
    },

    #[error("{course_id}: not scheduled")]
    Unscheduled { course_id: String },

    #[error("{0}")]
    Conflict(Conflict),
}

/// Audit `schedule` against the catalogs.
///
/// Per-entry issues come first in schedule order, then unscheduled courses in
/// catalog order, then the [`scan`] conflicts. An empty result means the
/// schedule satisfies every constraint checked here.
pub fn audit(
    schedule: &[ScheduleEntry],
    courses: &[Course],
    rooms: &[Room],
    instructors: &[Instructor],
) -> Vec<AuditIssue> {
    let index = CatalogIndex::new(courses, rooms, instructors);
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for entry in schedule {
        let course_id = &entry.course_id;
        if !seen.insert(course_id.as_str()) {
            issues.push(AuditIssue::DuplicateEntry {
                course_id: course_id.clone(),
            });
        }

        if let Err(violation) = check_placement(entry, &index) {
            issues.push(AuditIssue::Placement {
                course_id: course_id.clone(),
                violation,
            });
        }

        if let Some(instructor) = index.instructor(&entry.instructor_id) {
            if !instructor.teaches(course_id) {
                issues.push(AuditIssue::NotAssigned {
                    course_id: course_id.clone(),
                    instructor_id: instructor.id.clone(),
                });
            }
        }

        if let Some(course) = index.course(course_id) {
            let expected_minutes = (course.duration * 60.0).round().max(0.0) as u32;
            let actual_minutes = entry.duration_minutes();
            if expected_minutes != actual_minutes || entry.end_time < entry.start_time {
                issues.push(AuditIssue::DurationMismatch {
                    course_id: course_id.clone(),
                    expected_minutes,
                    actual_minutes,
                });
            }
        }

        if entry.start_time < WORKDAY_START || entry.end_time > WORKDAY_END {
            issues.push(AuditIssue::OutsideWorkday {
                course_id: course_id.clone(),
                start: entry.start_time,
                end: entry.end_time,
            });
        }
    }

    issues.extend(
        courses
            .iter()
            .filter(|course| !seen.contains(course.id.as_str()))
            .map(|course| AuditIssue::Unscheduled {
                course_id: course.id.clone(),
            }),
    );

    issues.extend(scan(schedule).into_iter().map(AuditIssue::Conflict));
    issues
}
