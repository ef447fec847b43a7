//! Seed catalogs and grid constants for a fresh timetable.

use crate::model::{AvailabilityWindow, Course, Day, Instructor, Room};
use crate::time::ClockTime;

pub const DAYS_OF_WEEK: [Day; 6] = Day::ALL;

/// First labelled hour and number of hourly rows.
const FIRST_SLOT_HOUR: u16 = 7;
const SLOT_COUNT: u16 = 14;

/// Start of the teaching day generated schedules must respect.
pub const WORKDAY_START: ClockTime = ClockTime(7 * 60);
/// End of the teaching day generated schedules must respect.
pub const WORKDAY_END: ClockTime = ClockTime(21 * 60);

/// An hourly row of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub value: ClockTime,
    pub display: String,
}

/// Hourly rows from 07:00 through 20:00.
pub fn time_slots() -> Vec<TimeSlot> {
    (0..SLOT_COUNT)
        .map(|i| {
            let value = ClockTime((FIRST_SLOT_HOUR + i) * 60);
            TimeSlot {
                value,
                display: value.to_12_hour(),
            }
        })
        .collect()
}

pub fn default_courses() -> Vec<Course> {
    [
        ("C101", "Intro to Computer Science", 1.5, 45),
        ("M201", "Calculus II", 1.0, 30),
        ("P303", "Modern Physics", 2.0, 25),
        ("H110", "World History", 1.5, 50),
        ("A401", "Advanced Algorithms", 2.5, 20),
        ("E210", "Digital Circuits", 2.0, 35),
    ]
    .into_iter()
    .map(|(id, name, duration, class_size)| Course {
        id: id.to_string(),
        name: name.to_string(),
        duration,
        class_size,
    })
    .collect()
}

pub fn default_rooms() -> Vec<Room> {
    [
        ("R1", "Main Hall", 50),
        ("R2", "Physics Lab", 30),
        ("R3", "Room 201", 40),
        ("R4", "Small Auditorium", 60),
    ]
    .into_iter()
    .map(|(id, name, capacity)| Room {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
    })
    .collect()
}

pub fn default_instructors() -> Vec<Instructor> {
    vec![
        instructor(
            "I001",
            "Dr. Alan Turing",
            &[(Day::Monday, 9, 12), (Day::Wednesday, 9, 12)],
            &["R1"],
            &["C101", "A401"],
        ),
        instructor(
            "I002",
            "Dr. Marie Curie",
            &[(Day::Tuesday, 10, 15), (Day::Thursday, 10, 15)],
            &["R2"],
            &["P303"],
        ),
        instructor(
            "I003",
            "Dr. Isaac Newton",
            &[(Day::Monday, 13, 17), (Day::Friday, 8, 12)],
            &[],
            &["M201"],
        ),
        instructor(
            "I004",
            "Dr. Ada Lovelace",
            &[
                (Day::Tuesday, 9, 17),
                (Day::Wednesday, 13, 17),
                (Day::Saturday, 10, 14),
            ],
            &["R3"],
            &["H110", "E210"],
        ),
    ]
}

fn instructor(
    id: &str,
    name: &str,
    hours: &[(Day, u16, u16)],
    preferred_rooms: &[&str],
    courses: &[&str],
) -> Instructor {
    Instructor {
        id: id.to_string(),
        name: name.to_string(),
        availability: hours
            .iter()
            .map(|&(day, from, to)| {
                AvailabilityWindow::new(day, ClockTime(from * 60), ClockTime(to * 60))
            })
            .collect(),
        preferred_room_ids: preferred_rooms.iter().map(|s| s.to_string()).collect(),
        assigned_course_ids: courses.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_rows_run_seven_to_eight_pm() {
        let slots = time_slots();
        assert_eq!(slots.len(), 14);
        assert_eq!(slots[0].display, "7:00 AM");
        assert_eq!(slots[13].value.to_string(), "20:00");
        assert_eq!(slots[13].display, "8:00 PM");
    }

    #[test]
    fn every_seed_course_has_an_instructor() {
        let instructors = default_instructors();
        for course in default_courses() {
            assert!(
                instructors.iter().any(|i| i.teaches(&course.id)),
                "{} has no instructor",
                course.id
            );
        }
    }
}
