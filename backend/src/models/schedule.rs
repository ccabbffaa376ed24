//! Generation output: assignments, persisted schedule entries, runs and conflicts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entities::{LecturerId, ModuleId, RoomId, ScheduleEntryId, Timeslot, TimeslotId};
use super::time::{TimeOfDay, Weekday};

/// Opaque identifier of one generation batch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Mint a fresh random run id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RunId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One accepted (module, lecturer, room, timeslot) placement inside a run that
/// has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub module_id: ModuleId,
    pub lecturer_id: LecturerId,
    pub room_id: RoomId,
    pub timeslot: Timeslot,
}

impl Assignment {
    pub fn timeslot_id(&self) -> TimeslotId {
        self.timeslot.id
    }
}

/// A persisted schedule row. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: ScheduleEntryId,
    pub module_id: ModuleId,
    pub lecturer_id: LecturerId,
    pub room_id: RoomId,
    pub timeslot_id: TimeslotId,
    pub day: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub run_id: RunId,
    pub created_at: DateTime<Utc>,
}

impl ScheduleEntry {
    /// Materialize an accepted assignment as a stored row of `run_id`.
    pub fn from_assignment(
        id: ScheduleEntryId,
        assignment: Assignment,
        run_id: &RunId,
        created_at: DateTime<Utc>,
    ) -> Self {
        let Assignment {
            module_id,
            lecturer_id,
            room_id,
            timeslot,
        } = assignment;
        Self {
            id,
            module_id,
            lecturer_id,
            room_id,
            timeslot_id: timeslot.id,
            day: timeslot.day,
            start_time: timeslot.start_time,
            end_time: timeslot.end_time,
            run_id: run_id.clone(),
            created_at,
        }
    }
}

/// Optional narrowing of a run's entries. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunFilter {
    pub room_id: Option<RoomId>,
    pub lecturer_id: Option<LecturerId>,
    pub day: Option<Weekday>,
}

impl RunFilter {
    pub fn is_empty(&self) -> bool {
        self.room_id.is_none() && self.lecturer_id.is_none() && self.day.is_none()
    }

    pub fn matches(&self, entry: &ScheduleEntry) -> bool {
        self.room_id.map_or(true, |id| entry.room_id == id)
            && self.lecturer_id.map_or(true, |id| entry.lecturer_id == id)
            && self.day.map_or(true, |day| entry.day == day)
    }
}

/// Lightweight listing of a stored run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: RunId,
    pub created_at: DateTime<Utc>,
}

/// A rejected candidate placement, reported back to the caller but never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Conflict {
    /// The lecturer is not available in this timeslot.
    LecturerUnavailable {
        module_id: ModuleId,
        lecturer_id: LecturerId,
        timeslot_id: TimeslotId,
    },
    /// The module's class does not fit in the room.
    RoomOverCapacity {
        module_id: ModuleId,
        room_id: RoomId,
        timeslot_id: TimeslotId,
        capacity: u32,
        required: u32,
    },
    /// The lecturer already teaches in this timeslot during this run.
    LecturerOverlap {
        module_id: ModuleId,
        lecturer_id: LecturerId,
        timeslot_id: TimeslotId,
    },
}

impl Conflict {
    pub fn module_id(&self) -> ModuleId {
        match self {
            Conflict::LecturerUnavailable { module_id, .. }
            | Conflict::RoomOverCapacity { module_id, .. }
            | Conflict::LecturerOverlap { module_id, .. } => *module_id,
        }
    }

    /// Wire name of the conflict type.
    pub fn kind(&self) -> &'static str {
        match self {
            Conflict::LecturerUnavailable { .. } => "lecturer_unavailable",
            Conflict::RoomOverCapacity { .. } => "room_over_capacity",
            Conflict::LecturerOverlap { .. } => "lecturer_overlap",
        }
    }
}

/// An uncommitted run: the transactional context a generation writes into.
///
/// Nothing in a batch is visible to readers until the run repository commits
/// it, at which point it replaces the previously stored run as a whole.
#[derive(Debug, Clone)]
pub struct RunBatch {
    run_id: RunId,
    created_at: DateTime<Utc>,
    assignments: Vec<Assignment>,
}

impl RunBatch {
    /// Open a batch under a freshly minted run id stamped with the current time.
    pub fn begin() -> Self {
        Self::with_identity(RunId::generate(), Utc::now())
    }

    pub fn with_identity(run_id: RunId, created_at: DateTime<Utc>) -> Self {
        Self {
            run_id,
            created_at,
            assignments: Vec::new(),
        }
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Accepted assignments in acceptance order (the partial schedule).
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn push(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Consume the batch into its parts.
    pub fn into_parts(self) -> (RunId, DateTime<Utc>, Vec<Assignment>) {
        (self.run_id, self.created_at, self.assignments)
    }
}
