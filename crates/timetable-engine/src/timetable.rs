//! The timetable as an application holds it: three catalogs plus a schedule.
//!
//! Every manual mutation goes through the single-entry validator against the
//! current schedule and is applied only when it passes. Generated proposals are
//! applied only when the whole proposal scans clean. Conflicts are recomputed
//! from the schedule on demand, never cached.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::audit::{audit, AuditIssue};
use crate::catalog::CatalogIndex;
use crate::conflict::{scan, Conflict};
use crate::defaults;
use crate::error::{Result, TimetableError};
use crate::generate::{GenerationRequest, ScheduleGenerator};
use crate::layout::{layout_week, EntryLayout, LayoutConfig};
use crate::model::{Course, Day, Instructor, Room, ScheduleEntry};
use crate::time::{end_time_for, ClockTime};
use crate::validate::{validate_with, Violation};

/// Persisted state: four named collections, any of which may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
}

impl Timetable {
    /// An empty schedule over the given catalogs.
    pub fn new(courses: Vec<Course>, instructors: Vec<Instructor>, rooms: Vec<Room>) -> Self {
        Self {
            courses,
            instructors,
            rooms,
            schedule: Vec::new(),
        }
    }

    /// An empty schedule over the seed catalogs.
    pub fn seeded() -> Self {
        Self::new(
            defaults::default_courses(),
            defaults::default_instructors(),
            defaults::default_rooms(),
        )
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A lookup index over the catalogs as they are right now.
    pub fn index(&self) -> CatalogIndex<'_> {
        CatalogIndex::new(&self.courses, &self.rooms, &self.instructors)
    }

    pub fn entry(&self, course_id: &str) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|e| e.course_id == course_id)
    }

    pub fn conflicts(&self) -> Vec<Conflict> {
        scan(&self.schedule)
    }

    /// Whether the course's entry takes part in any detected conflict.
    pub fn is_conflicting(&self, course_id: &str) -> bool {
        self.conflicts().iter().any(|c| c.involves(course_id))
    }

    /// Catalog courses that have no entry yet, in catalog order.
    pub fn unassigned_courses(&self) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|course| self.entry(&course.id).is_none())
            .collect()
    }

    /// Run the single-entry validator for `candidate` against the current schedule.
    pub fn check(&self, candidate: &ScheduleEntry) -> Option<Violation> {
        validate_with(candidate, &self.schedule, &self.index())
    }

    /// Move a scheduled course to a new day and start time.
    ///
    /// The end time is recomputed from the course duration; room and
    /// instructor are kept.
    pub fn move_entry(&mut self, course_id: &str, day: Day, start: ClockTime) -> Result<ScheduleEntry> {
        let current = self
            .entry(course_id)
            .ok_or_else(|| TimetableError::EntryNotFound(course_id.to_string()))?;
        let course = self
            .index()
            .course(course_id)
            .ok_or_else(|| TimetableError::CourseNotFound(course_id.to_string()))?;

        let moved = ScheduleEntry {
            day,
            start_time: start,
            end_time: end_time_for(start, course.duration)?,
            ..current.clone()
        };

        self.commit(moved.clone())?;
        Ok(moved)
    }

    /// Create an entry, or replace the existing entry for the same course.
    pub fn save_entry(&mut self, entry: ScheduleEntry) -> Result<()> {
        self.commit(entry)
    }

    /// Remove a course from the schedule, returning its entry.
    pub fn delete_entry(&mut self, course_id: &str) -> Result<ScheduleEntry> {
        let position = self
            .schedule
            .iter()
            .position(|e| e.course_id == course_id)
            .ok_or_else(|| TimetableError::EntryNotFound(course_id.to_string()))?;
        let removed = self.schedule.remove(position);
        debug!(course_id, "removed schedule entry");
        Ok(removed)
    }

    /// Replace the whole schedule with a generated proposal.
    ///
    /// The proposal is scanned first; if it holds any conflict it is dropped
    /// and the current schedule is kept as is.
    pub fn accept_generated(&mut self, proposal: Vec<ScheduleEntry>) -> Result<()> {
        let conflicts = scan(&proposal);
        if !conflicts.is_empty() {
            for conflict in &conflicts {
                warn!(%conflict, "generated schedule conflict");
            }
            return Err(TimetableError::GeneratedConflicts {
                count: conflicts.len(),
            });
        }

        debug!(entries = proposal.len(), "accepted generated schedule");
        self.schedule = proposal;
        Ok(())
    }

    /// Ask `generator` for a schedule over the current catalogs and accept it.
    ///
    /// Returns the number of entries in the new schedule.
    pub fn generate_with(&mut self, generator: &dyn ScheduleGenerator) -> Result<usize> {
        let proposal = generator.generate(&self.generation_request())?;
        self.accept_generated(proposal)?;
        Ok(self.schedule.len())
    }

    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            courses: self.courses.clone(),
            instructors: self.instructors.clone(),
            rooms: self.rooms.clone(),
        }
    }

    pub fn layout(&self, config: &LayoutConfig) -> Vec<EntryLayout> {
        layout_week(&self.schedule, config)
    }

    pub fn audit(&self) -> Vec<AuditIssue> {
        audit(&self.schedule, &self.courses, &self.rooms, &self.instructors)
    }

    fn commit(&mut self, entry: ScheduleEntry) -> Result<()> {
        if let Some(violation) = self.check(&entry) {
            warn!(course_id = %entry.course_id, %violation, "rejected schedule change");
            return Err(TimetableError::Rejected(violation));
        }

        match self
            .schedule
            .iter_mut()
            .find(|e| e.course_id == entry.course_id)
        {
            Some(existing) => *existing = entry,
            None => self.schedule.push(entry),
        }
        debug!("schedule change applied");
        Ok(())
    }
}
