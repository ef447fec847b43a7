//! Detect double-booked instructors and rooms across a whole schedule.
//!
//! Entries are bucketed per (resource, day), sorted by start time, and each
//! adjacent pair is compared. Adjacent entries (where one ends exactly when the
//! next starts) are NOT conflicts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Day, ScheduleEntry};
use crate::time::ClockTime;

/// Which shared resource two entries contend for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    Instructor,
    Room,
}

/// A detected overlap between two entries sharing an instructor or a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    /// Instructor id or room id, depending on `kind`.
    pub id: String,
    pub day: Day,
    /// Start time of the later-starting entry.
    pub time: ClockTime,
    /// `[earlier, later]` in start-time order.
    pub conflicting_entries: [ScheduleEntry; 2],
}

impl Conflict {
    pub fn involves(&self, course_id: &str) -> bool {
        self.conflicting_entries
            .iter()
            .any(|entry| entry.course_id == course_id)
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::Instructor => f.write_str("instructor"),
            ConflictKind::Room => f.write_str("room"),
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = &self.conflicting_entries;
        write!(
            f,
            "{} {} double-booked on {} at {} ({} {}-{}, {} {}-{})",
            self.kind,
            self.id,
            self.day,
            self.time,
            first.course_id,
            first.start_time,
            first.end_time,
            second.course_id,
            second.start_time,
            second.end_time,
        )
    }
}

/// Find every adjacent overlapping pair per instructor/day and per room/day.
///
/// Instructor conflicts come first, then room conflicts. Within each kind,
/// buckets are visited in ascending (resource id, day) order and each bucket
/// yields its conflicts in start-time order.
///
/// Only neighbours in start order are compared, so in a cluster of three or
/// more mutually overlapping entries not every pair is reported, but every
/// cluster produces at least one conflict.
pub fn scan(schedule: &[ScheduleEntry]) -> Vec<Conflict> {
    let mut conflicts = scan_by(schedule, ConflictKind::Instructor, |e| &e.instructor_id);
    conflicts.extend(scan_by(schedule, ConflictKind::Room, |e| &e.room_id));
    conflicts
}

fn scan_by<'a>(
    schedule: &'a [ScheduleEntry],
    kind: ConflictKind,
    resource: impl Fn(&'a ScheduleEntry) -> &'a String,
) -> Vec<Conflict> {
    let mut buckets: BTreeMap<(&'a str, Day), Vec<&'a ScheduleEntry>> = BTreeMap::new();
    for entry in schedule {
        buckets
            .entry((resource(entry).as_str(), entry.day))
            .or_default()
            .push(entry);
    }

    let mut conflicts = Vec::new();
    for ((resource_id, day), mut bookings) in buckets {
        // `sort_by_key` is stable: equal starts keep their schedule order.
        bookings.sort_by_key(|entry| entry.start_time);

        for pair in bookings.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if current.end_time > next.start_time {
                conflicts.push(Conflict {
                    kind,
                    id: resource_id.to_string(),
                    day,
                    time: next.start_time,
                    conflicting_entries: [current.clone(), next.clone()],
                });
            }
        }
    }

    conflicts
}
