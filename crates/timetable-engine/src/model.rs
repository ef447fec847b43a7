//! Catalog entities and the schedule entry they are assigned through.
//!
//! Field names serialize in camelCase so persisted state and generator
//! payloads keep the shape the rest of the application exchanges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time::ClockTime;

/// Teaching days of the week. Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const ALL: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = String;

    /// Case-insensitive; accepts full names and three-letter abbreviations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| format!("Unknown day '{}': expected Monday through Saturday", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    /// Length of one session in hours (may be fractional, e.g. 1.5).
    pub duration: f64,
    /// Enrolled headcount the assigned room must hold.
    pub class_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub capacity: u32,
}

/// The hours an instructor can teach on one day.
///
/// Either bound may be absent (an empty string on the wire), which marks the
/// instructor as unavailable for that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day: Day,
    #[serde(default, with = "optional_time")]
    pub start: Option<ClockTime>,
    #[serde(default, with = "optional_time")]
    pub end: Option<ClockTime>,
}

impl AvailabilityWindow {
    pub fn new(day: Day, start: ClockTime, end: ClockTime) -> Self {
        Self {
            day,
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both bounds, or `None` when the window is incomplete.
    pub fn bounds(&self) -> Option<(ClockTime, ClockTime)> {
        Some((self.start?, self.end?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub availability: Vec<AvailabilityWindow>,
    /// Advisory only; validation never looks at it.
    #[serde(default)]
    pub preferred_room_ids: Vec<String>,
    #[serde(default)]
    pub assigned_course_ids: Vec<String>,
}

impl Instructor {
    /// The first availability window listed for `day`.
    pub fn window_for(&self, day: Day) -> Option<&AvailabilityWindow> {
        self.availability.iter().find(|w| w.day == day)
    }

    pub fn teaches(&self, course_id: &str) -> bool {
        self.assigned_course_ids.iter().any(|id| id == course_id)
    }
}

/// One scheduled occurrence of a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub course_id: String,
    pub instructor_id: String,
    pub room_id: String,
    pub day: Day,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl ScheduleEntry {
    /// Half-open overlap on the clock: touching endpoints do not overlap.
    ///
    /// Days are not compared; callers bucket by day first.
    pub fn overlaps(&self, other: &ScheduleEntry) -> bool {
        self.start_time < other.end_time && self.end_time > other.start_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }
}

/// Serde adapter mapping an absent or empty `"HH:MM"` string to `None`.
mod optional_time {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::time::ClockTime;

    pub fn serialize<S>(value: &Option<ClockTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ClockTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parses_loosely() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("Sat".parse::<Day>().unwrap(), Day::Saturday);
        assert!("Sunday".parse::<Day>().is_err());
    }

    #[test]
    fn empty_window_bounds_mean_unavailable() {
        let json = r#"{"day":"Tuesday","start":"","end":"15:00"}"#;
        let window: AvailabilityWindow = serde_json::from_str(json).unwrap();
        assert_eq!(window.start, None);
        assert!(window.bounds().is_none());
    }

    #[test]
    fn entry_uses_camel_case_wire_names() {
        let json = r#"{"courseId":"C101","instructorId":"I001","roomId":"R1",
                       "day":"Monday","startTime":"09:00","endTime":"10:30"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.duration_minutes(), 90);
        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["startTime"], "09:00");
    }

    #[test]
    fn malformed_entry_time_is_rejected() {
        let json = r#"{"courseId":"C101","instructorId":"I001","roomId":"R1",
                       "day":"Monday","startTime":"9am","endTime":"10:30"}"#;
        assert!(serde_json::from_str::<ScheduleEntry>(json).is_err());
    }
}
