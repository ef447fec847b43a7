//! Read-only lookup by identity over the current catalogs.
//!
//! Built once per invocation from borrowed slices and never mutated; when a
//! catalog changes, callers build a fresh index.

use std::collections::HashMap;

use crate::model::{Course, Instructor, Room};

#[derive(Debug, Clone, Default)]
pub struct CatalogIndex<'a> {
    courses: HashMap<&'a str, &'a Course>,
    rooms: HashMap<&'a str, &'a Room>,
    instructors: HashMap<&'a str, &'a Instructor>,
}

impl<'a> CatalogIndex<'a> {
    /// Index the three catalogs. On duplicate ids the first record wins,
    /// matching a front-to-back search of the slice.
    pub fn new(courses: &'a [Course], rooms: &'a [Room], instructors: &'a [Instructor]) -> Self {
        Self {
            courses: index_by(courses, |c| c.id.as_str()),
            rooms: index_by(rooms, |r| r.id.as_str()),
            instructors: index_by(instructors, |i| i.id.as_str()),
        }
    }

    pub fn course(&self, id: &str) -> Option<&'a Course> {
        self.courses.get(id).copied()
    }

    pub fn room(&self, id: &str) -> Option<&'a Room> {
        self.rooms.get(id).copied()
    }

    pub fn instructor(&self, id: &str) -> Option<&'a Instructor> {
        self.instructors.get(id).copied()
    }

    /// Display name of a course, falling back to its id when it is not indexed.
    pub fn course_name<'b>(&self, id: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.course(id).map_or(id, |c| c.name.as_str())
    }
}

fn index_by<'a, T>(items: &'a [T], key: impl Fn(&'a T) -> &'a str) -> HashMap<&'a str, &'a T> {
    let mut map = HashMap::with_capacity(items.len());
    for item in items {
        map.entry(key(item)).or_insert(item);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_duplicate_wins() {
        let rooms = vec![
            Room {
                id: "R1".into(),
                name: "Main Hall".into(),
                capacity: 50,
            },
            Room {
                id: "R1".into(),
                name: "Shadow".into(),
                capacity: 5,
            },
        ];
        let index = CatalogIndex::new(&[], &rooms, &[]);
        assert_eq!(index.room("R1").unwrap().name, "Main Hall");
        assert!(index.room("R2").is_none());
        assert_eq!(index.course_name("C404"), "C404");
    }
}
