//! Per-instructor and per-room views of a schedule.
//!
//! Each group lists its entries in week order: by day (Monday first), then by
//! start time. Entries with equal day and start keep their schedule order.

use std::collections::BTreeMap;

use crate::model::ScheduleEntry;

/// The schedule sorted by (day, start time), stable.
pub fn in_week_order(schedule: &[ScheduleEntry]) -> Vec<&ScheduleEntry> {
    let mut sorted: Vec<&ScheduleEntry> = schedule.iter().collect();
    sorted.sort_by_key(|entry| (entry.day, entry.start_time));
    sorted
}

/// Entries grouped by instructor id, each group in week order.
pub fn by_instructor(schedule: &[ScheduleEntry]) -> BTreeMap<&str, Vec<&ScheduleEntry>> {
    group_by(schedule, |entry| &entry.instructor_id)
}

/// Entries grouped by room id, each group in week order.
pub fn by_room(schedule: &[ScheduleEntry]) -> BTreeMap<&str, Vec<&ScheduleEntry>> {
    group_by(schedule, |entry| &entry.room_id)
}

fn group_by<'a>(
    schedule: &'a [ScheduleEntry],
    key: impl Fn(&'a ScheduleEntry) -> &'a String,
) -> BTreeMap<&'a str, Vec<&'a ScheduleEntry>> {
    let mut groups: BTreeMap<&'a str, Vec<&'a ScheduleEntry>> = BTreeMap::new();
    for entry in in_week_order(schedule) {
        groups.entry(key(entry).as_str()).or_default().push(entry);
    }
    groups
}
