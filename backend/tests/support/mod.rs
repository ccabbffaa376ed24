#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use timetable_engine::models::{
    Dataset, Lecturer, LecturerId, Module, ModuleId, Room, RoomId, TimeOfDay, Timeslot,
    TimeslotId, Weekday,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Path of the dataset shipped with the crate.
pub fn sample_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample_dataset.json")
}

pub fn timeslot(id: i64, day: Weekday, start_hour: u32) -> Timeslot {
    Timeslot {
        id: TimeslotId::new(id),
        day,
        start_time: TimeOfDay::from_hm(start_hour, 0).unwrap(),
        end_time: TimeOfDay::from_hm(start_hour + 1, 0).unwrap(),
    }
}

pub fn lecturer(id: i64, max_weekly_hours: u32, available: &[i64]) -> Lecturer {
    Lecturer {
        id: LecturerId::new(id),
        name: format!("Lecturer {}", id),
        email: format!("lecturer{}@example.com", id),
        specialty: None,
        max_weekly_hours,
        available_timeslots: available.iter().copied().map(TimeslotId::new).collect(),
    }
}

pub fn module(id: i64, weekly_hours: f64, expected_students: u32) -> Module {
    Module {
        id: ModuleId::new(id),
        code: format!("MOD{}", id),
        name: format!("Module {}", id),
        description: None,
        weekly_hours,
        expected_students,
        program_level: "Undergraduate".to_string(),
    }
}

pub fn room(id: i64, capacity: Option<u32>) -> Room {
    Room {
        id: RoomId::new(id),
        name: format!("Room {}", id),
        capacity,
    }
}

/// One lecturer, one module needing two slots for 20 students, one room and
/// two Monday slots (09:00 and 10:00).
///
/// `available` controls whether the lecturer may teach in both slots.
pub fn two_slot_dataset(room_capacity: u32, max_weekly_hours: u32, available: bool) -> Dataset {
    let availability: &[i64] = if available { &[1, 2] } else { &[] };
    Dataset {
        lecturers: vec![lecturer(1, max_weekly_hours, availability)],
        modules: vec![module(1, 2.0, 20)],
        rooms: vec![room(1, Some(room_capacity))],
        timeslots: vec![
            timeslot(1, Weekday::Monday, 9),
            timeslot(2, Weekday::Monday, 10),
        ],
    }
}
