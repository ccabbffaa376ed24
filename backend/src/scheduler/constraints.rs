//! Pure conflict predicates over a partial schedule.
//!
//! None of these functions mutate anything; they can be called in any order
//! and any number of times.

use crate::models::{Assignment, Lecturer, Module, Room, Timeslot};

/// False iff `partial` already places `lecturer` in `timeslot`.
pub fn lecturer_is_free(lecturer: &Lecturer, timeslot: &Timeslot, partial: &[Assignment]) -> bool {
    !partial
        .iter()
        .any(|a| a.lecturer_id == lecturer.id && a.timeslot_id() == timeslot.id)
}

/// False iff `partial` already places something in `room` during `timeslot`.
pub fn room_is_free(room: &Room, timeslot: &Timeslot, partial: &[Assignment]) -> bool {
    !partial
        .iter()
        .any(|a| a.room_id == room.id && a.timeslot_id() == timeslot.id)
}

/// True iff both the lecturer and the room are free in `timeslot`.
///
/// Module-level demand and room capacity are checked by the generator before
/// this is called.
pub fn assignment_is_valid(
    lecturer: &Lecturer,
    _module: &Module,
    room: &Room,
    timeslot: &Timeslot,
    partial: &[Assignment],
) -> bool {
    lecturer_is_free(lecturer, timeslot, partial) && room_is_free(room, timeslot, partial)
}
