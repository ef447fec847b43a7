//! Clock-time arithmetic for the weekly grid.
//!
//! Times travel as zero-padded 24-hour `HH:MM` strings and are compared as
//! minute offsets from midnight. Parsing is strict: anything that is not a
//! valid `HH:MM` between `00:00` and `23:59` is a [`TimetableError::InvalidTime`].
//! Only [`to_display`] is lenient, because display code must never fail.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A minute-granularity time of day, `00:00` through `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(pub(crate) u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build a time from minutes past midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimetableError::TimeOutOfRange { minutes });
        }
        Ok(ClockTime(minutes as u16))
    }

    /// Build a time from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(TimetableError::InvalidTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(ClockTime((hour * 60 + minute) as u16))
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Render as `h:MM AM|PM`.
    ///
    /// Midnight is `12:00 AM`, noon is `12:00 PM`, and afternoon hours drop by 12.
    pub fn to_12_hour(self) -> String {
        let hour = self.hour();
        let period = if hour >= 12 { "PM" } else { "AM" };
        let display_hour = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        format!("{}:{:02} {}", display_hour, self.minute(), period)
    }

    /// Advance by a fractional number of hours, rounded to the nearest minute.
    ///
    /// Fails with [`TimetableError::TimeOutOfRange`] when the result would pass
    /// `23:59`, including an end of exactly `24:00`; entries never wrap into
    /// the next day.
    pub fn plus_hours(self, hours: f64) -> Result<Self> {
        let offset = (hours * 60.0).round();
        let total = f64::from(self.minutes()) + offset;
        if !total.is_finite() || total < 0.0 {
            return Err(TimetableError::TimeOutOfRange { minutes: 0 });
        }
        Self::from_minutes(total as u32)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        // chrono tolerates unpadded and space-padded fields; the wire form does not.
        if !is_hh_mm(s) {
            return Err(TimetableError::InvalidTime(s.to_string()));
        }
        let parsed = NaiveTime::parse_from_str(s, "%H:%M")
            .map_err(|_| TimetableError::InvalidTime(s.to_string()))?;
        Self::from_hm(parsed.hour(), parsed.minute())
    }
}

/// Exactly two digits, a colon, two digits.
fn is_hh_mm(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}

impl TryFrom<String> for ClockTime {
    type Error = TimetableError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

/// Parse `HH:MM` into minutes past midnight.
pub fn to_minutes(time: &str) -> Result<u32> {
    time.parse::<ClockTime>().map(ClockTime::minutes)
}

/// Render `HH:MM` in 12-hour form, passing anything unparseable through unchanged.
pub fn to_display(time: &str) -> String {
    match time.parse::<ClockTime>() {
        Ok(parsed) => parsed.to_12_hour(),
        Err(_) => time.to_string(),
    }
}

/// End time of a class that starts at `start` and runs `duration_hours`.
pub fn end_time_for(start: ClockTime, duration_hours: f64) -> Result<ClockTime> {
    start.plus_hours(duration_hours)
}
