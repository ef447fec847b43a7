//! Side-by-side column layout for entries that share a slice of the day.
//!
//! Each entry's column is derived from its own overlap set (itself plus every
//! same-day entry it intersects), sorted by course id. Two entries in one
//! visual cluster can therefore receive different column counts when their
//! neighbour sets differ; this only changes widths, never conflict results.

use serde::Serialize;

use crate::model::{Day, ScheduleEntry};
use crate::time::ClockTime;

/// Geometry constants for the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Time of day drawn at the top edge of the grid.
    pub day_start: ClockTime,
    /// Vertical units per hour.
    pub hour_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            day_start: ClockTime(7 * 60),
            hour_height: 4.5,
        }
    }
}

/// Where one entry sits on its day column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryLayout {
    pub course_id: String,
    pub day: Day,
    /// Position within the entry's sorted overlap set.
    pub column: usize,
    /// Size of the entry's overlap set, including itself.
    pub columns: usize,
    /// Vertical offset from `day_start`, in `hour_height` units. Negative when
    /// the entry starts before the anchor.
    pub top: f64,
    pub height: f64,
    /// Horizontal offset, percent of the day column.
    pub left: f64,
    /// Width, percent of the day column.
    pub width: f64,
    pub z_index: usize,
}

/// Lay out the entries of `schedule` that fall on `day`, in start-time order.
pub fn layout_day(schedule: &[ScheduleEntry], day: Day, config: &LayoutConfig) -> Vec<EntryLayout> {
    let mut entries: Vec<&ScheduleEntry> = schedule.iter().filter(|e| e.day == day).collect();
    entries.sort_by_key(|e| e.start_time);

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut overlap_set: Vec<&ScheduleEntry> = entries
                .iter()
                .enumerate()
                .filter(|&(j, other)| j != i && entry.overlaps(other))
                .map(|(_, other)| *other)
                .collect();
            overlap_set.push(*entry);
            overlap_set.sort_by(|a, b| a.course_id.cmp(&b.course_id));

            let column = overlap_set
                .iter()
                .position(|e| e.course_id == entry.course_id)
                .unwrap_or(0);
            let columns = overlap_set.len();
            place(entry, column, columns, config)
        })
        .collect()
}

/// Lay out every teaching day, Monday through Saturday.
pub fn layout_week(schedule: &[ScheduleEntry], config: &LayoutConfig) -> Vec<EntryLayout> {
    Day::ALL
        .into_iter()
        .flat_map(|day| layout_day(schedule, day, config))
        .collect()
}

fn place(entry: &ScheduleEntry, column: usize, columns: usize, config: &LayoutConfig) -> EntryLayout {
    let offset = f64::from(entry.start_time.minutes()) - f64::from(config.day_start.minutes());
    let width = 100.0 / columns as f64;

    EntryLayout {
        course_id: entry.course_id.clone(),
        day: entry.day,
        column,
        columns,
        top: offset / 60.0 * config.hour_height,
        height: f64::from(entry.duration_minutes()) / 60.0 * config.hour_height,
        left: width * column as f64,
        width,
        z_index: 10 + column,
    }
}
