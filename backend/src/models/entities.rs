//! Reference entities consumed by the schedule generator.
//!
//! These are read-only snapshots supplied by the reference data repository.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::time::{TimeOfDay, Weekday};
use crate::define_id_type;

define_id_type!(
    /// Lecturer identifier.
    i64,
    LecturerId
);
define_id_type!(
    /// Module identifier.
    i64,
    ModuleId
);
define_id_type!(
    /// Room identifier.
    i64,
    RoomId
);
define_id_type!(
    /// Timeslot identifier.
    i64,
    TimeslotId
);
define_id_type!(
    /// Persisted schedule entry identifier.
    i64,
    ScheduleEntryId
);

/// A lecturer together with the timeslots they can teach in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    pub id: LecturerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub specialty: Option<String>,
    /// Maximum number of slots this lecturer may receive in one run.
    pub max_weekly_hours: u32,
    /// Explicit lecturer-timeslot associations.
    #[serde(default)]
    pub available_timeslots: HashSet<TimeslotId>,
}

impl Lecturer {
    pub fn is_available(&self, timeslot_id: TimeslotId) -> bool {
        self.available_timeslots.contains(&timeslot_id)
    }
}

/// A teaching module and its weekly demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Weekly contact hours; fractional values are truncated.
    pub weekly_hours: f64,
    /// Class size.
    #[serde(default)]
    pub expected_students: u32,
    pub program_level: String,
}

impl Module {
    /// Number of slot assignments this module asks for.
    pub fn hours_needed(&self) -> u32 {
        if self.weekly_hours.is_finite() && self.weekly_hours > 0.0 {
            self.weekly_hours.floor() as u32
        } else {
            0
        }
    }
}

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// `None` means the room has no recorded capacity and cannot host anything.
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl Room {
    /// Effective seat count, zero when unknown.
    pub fn effective_capacity(&self) -> u32 {
        self.capacity.unwrap_or(0)
    }

    /// Whether a class of `students` fits.
    pub fn can_seat(&self, students: u32) -> bool {
        match self.capacity {
            Some(capacity) => students <= capacity,
            None => false,
        }
    }
}

/// A weekly teaching slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeslot {
    pub id: TimeslotId,
    pub day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl Timeslot {
    pub fn is_weekend(&self) -> bool {
        self.day.is_weekend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module_with_hours(weekly_hours: f64) -> Module {
        Module {
            id: ModuleId::new(1),
            code: "CS101".to_string(),
            name: "Intro".to_string(),
            description: None,
            weekly_hours,
            expected_students: 10,
            program_level: "Undergraduate".to_string(),
        }
    }

    #[test]
    fn test_hours_needed_truncates() {
        assert_eq!(module_with_hours(2.0).hours_needed(), 2);
        assert_eq!(module_with_hours(2.9).hours_needed(), 2);
        assert_eq!(module_with_hours(0.5).hours_needed(), 0);
    }

    #[test]
    fn test_hours_needed_ignores_nonsense() {
        assert_eq!(module_with_hours(-3.0).hours_needed(), 0);
        assert_eq!(module_with_hours(f64::NAN).hours_needed(), 0);
    }

    #[test]
    fn test_room_without_capacity_seats_nobody() {
        let room = Room {
            id: RoomId::new(1),
            name: "Annex".to_string(),
            capacity: None,
        };
        assert!(!room.can_seat(0));
        assert_eq!(room.effective_capacity(), 0);
    }

    #[test]
    fn test_room_capacity_is_inclusive() {
        let room = Room {
            id: RoomId::new(1),
            name: "Hall".to_string(),
            capacity: Some(30),
        };
        assert!(room.can_seat(30));
        assert!(!room.can_seat(31));
    }

    #[test]
    fn test_ids_serialize_as_plain_integers() {
        assert_eq!(serde_json::to_string(&LecturerId::new(7)).unwrap(), "7");
        let id: TimeslotId = serde_json::from_str("12").unwrap();
        assert_eq!(id.value(), 12);
    }
}
