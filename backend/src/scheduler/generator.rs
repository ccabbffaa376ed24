//! Greedy timetable generation.
//!
//! The generator walks modules in input order and, for each, tries every
//! (lecturer, room, timeslot) triple in input order until the module's weekly
//! demand is met or the candidates run out. There is no backtracking: an
//! accepted placement is never revisited, so the order of the inputs is part
//! of the observable result.
//!
//! Candidate checks, first failure wins:
//!
//! 1. lecturer not available in the timeslot → `lecturer_unavailable`
//! 2. class larger than the room → `room_over_capacity`
//! 3. lecturer already teaching in the timeslot this run → `lecturer_overlap`
//! 4. lecturer reached `max_weekly_hours` → skipped, nothing reported
//! 5. module demand already met → stop searching for this module
//! 6. room or lecturer taken in the partial schedule → skipped, nothing reported
//!
//! Worst case is O(modules × lecturers × rooms × timeslots) candidate checks,
//! each of which scans the partial schedule once. Fine for the tens of
//! entities a department deals with; revisit before feeding it thousands.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::constraints;
use crate::models::{
    Assignment, Conflict, Dataset, Lecturer, LecturerId, Module, Room, RunBatch, Timeslot,
    TimeslotId,
};

/// Greedy generator over one snapshot of reference data.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator<'a> {
    lecturers: &'a [Lecturer],
    modules: &'a [Module],
    rooms: &'a [Room],
    timeslots: Vec<&'a Timeslot>,
}

impl<'a> ScheduleGenerator<'a> {
    /// Build a generator over the given snapshot. Weekend timeslots are dropped.
    pub fn new(
        lecturers: &'a [Lecturer],
        modules: &'a [Module],
        rooms: &'a [Room],
        timeslots: &'a [Timeslot],
    ) -> Self {
        Self {
            lecturers,
            modules,
            rooms,
            timeslots: timeslots.iter().filter(|t| !t.is_weekend()).collect(),
        }
    }

    pub fn from_dataset(dataset: &'a Dataset) -> Self {
        Self::new(
            &dataset.lecturers,
            &dataset.modules,
            &dataset.rooms,
            &dataset.timeslots,
        )
    }

    /// Run one full pass, appending accepted assignments to `batch`.
    ///
    /// Returns every conflict met along the way. Infeasible demand is never an
    /// error; it shows up as conflicts and as fewer assignments than asked for.
    pub fn generate(&self, batch: &mut RunBatch) -> Vec<Conflict> {
        let availability: HashMap<LecturerId, &HashSet<TimeslotId>> = self
            .lecturers
            .iter()
            .map(|l| (l.id, &l.available_timeslots))
            .collect();
        let mut assigned_timeslots_per_lecturer: HashMap<LecturerId, HashSet<TimeslotId>> =
            HashMap::new();
        let mut conflicts = Vec::new();

        for module in self.modules {
            let hours_needed = module.hours_needed();
            let mut assigned_hours = 0u32;

            'lecturers: for lecturer in self.lecturers {
                let available = availability.get(&lecturer.id);

                for room in self.rooms {
                    for timeslot in &self.timeslots {
                        if !available.is_some_and(|slots| slots.contains(&timeslot.id)) {
                            conflicts.push(Conflict::LecturerUnavailable {
                                module_id: module.id,
                                lecturer_id: lecturer.id,
                                timeslot_id: timeslot.id,
                            });
                            continue;
                        }

                        if !room.can_seat(module.expected_students) {
                            conflicts.push(Conflict::RoomOverCapacity {
                                module_id: module.id,
                                room_id: room.id,
                                timeslot_id: timeslot.id,
                                capacity: room.effective_capacity(),
                                required: module.expected_students,
                            });
                            continue;
                        }

                        let used = assigned_timeslots_per_lecturer
                            .entry(lecturer.id)
                            .or_default();
                        if used.contains(&timeslot.id) {
                            conflicts.push(Conflict::LecturerOverlap {
                                module_id: module.id,
                                lecturer_id: lecturer.id,
                                timeslot_id: timeslot.id,
                            });
                            continue;
                        }

                        // Load cap reached: not a conflict, just no more capacity.
                        if used.len() >= lecturer.max_weekly_hours as usize {
                            continue;
                        }

                        if assigned_hours >= hours_needed {
                            break 'lecturers;
                        }

                        if !constraints::assignment_is_valid(
                            lecturer,
                            module,
                            room,
                            timeslot,
                            batch.assignments(),
                        ) {
                            continue;
                        }

                        batch.push(Assignment {
                            module_id: module.id,
                            lecturer_id: lecturer.id,
                            room_id: room.id,
                            timeslot: (*timeslot).clone(),
                        });
                        used.insert(timeslot.id);
                        assigned_hours += 1;

                        if assigned_hours >= hours_needed {
                            break 'lecturers;
                        }
                    }
                }
            }

            if assigned_hours < hours_needed {
                warn!(
                    "Module {} ({}) partially scheduled: {}/{} slots",
                    module.id, module.code, assigned_hours, hours_needed
                );
            } else {
                debug!(
                    "Module {} ({}) fully scheduled with {} slots",
                    module.id, module.code, assigned_hours
                );
            }
        }

        conflicts
    }
}

/// Convenience wrapper: run the generator over `dataset` into `batch`.
pub fn generate_schedule(dataset: &Dataset, batch: &mut RunBatch) -> Vec<Conflict> {
    ScheduleGenerator::from_dataset(dataset).generate(batch)
}
