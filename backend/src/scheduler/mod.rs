//! Schedule generation engine.
//!
//! [`constraints`] holds the side-effect-free conflict predicates and
//! [`generator`] the greedy pass that turns a reference-data snapshot into a
//! run batch plus a conflict log. Persisting the batch is the caller's job
//! (see `db::services::generate_timetable`).

pub mod constraints;
pub mod generator;

pub use constraints::{assignment_is_valid, lecturer_is_free, room_is_free};
pub use generator::{generate_schedule, ScheduleGenerator};
