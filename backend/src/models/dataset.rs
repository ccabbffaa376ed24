// ============================================================================
// Dataset Loading
// ============================================================================
//
// A dataset is the full set of reference entities (lecturers, modules, rooms,
// timeslots) in one JSON document. It is how the local repository is seeded
// and the one place where raw strings become typed entities.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::entities::{Lecturer, LecturerId, Module, ModuleId, Room, Timeslot, TimeslotId};
use super::time::{TimeOfDay, Weekday};

/// Typed, validated reference data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub lecturers: Vec<Lecturer>,
    pub modules: Vec<Module>,
    pub rooms: Vec<Room>,
    pub timeslots: Vec<Timeslot>,
}

#[derive(Deserialize)]
struct DatasetInput {
    #[serde(default)]
    lecturers: Vec<LecturerInput>,
    #[serde(default)]
    modules: Vec<ModuleInput>,
    #[serde(default)]
    rooms: Vec<Room>,
    #[serde(default)]
    timeslots: Vec<TimeslotInput>,
}

#[derive(Deserialize)]
struct LecturerInput {
    id: i64,
    name: String,
    email: String,
    #[serde(default)]
    specialty: Option<String>,
    max_weekly_hours: u32,
    #[serde(default)]
    available_timeslot_ids: Vec<i64>,
}

#[derive(Deserialize)]
struct ModuleInput {
    id: i64,
    code: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    weekly_hours: f64,
    #[serde(default)]
    expected_students: Option<u32>,
    program_level: String,
}

#[derive(Deserialize)]
struct TimeslotInput {
    id: i64,
    day: String,
    start_time: String,
    end_time: String,
}

/// Parse and validate a dataset from a JSON string.
///
/// All problems are collected and reported together rather than stopping at
/// the first one.
pub fn parse_dataset_json_str(json: &str) -> Result<Dataset> {
    let input: DatasetInput =
        serde_json::from_str(json).context("Failed to deserialize dataset JSON")?;

    let mut issues = Vec::new();

    let mut timeslots = Vec::with_capacity(input.timeslots.len());
    for raw in input.timeslots {
        match convert_timeslot(&raw) {
            Ok(timeslot) => timeslots.push(timeslot),
            Err(issue) => issues.push(issue),
        }
    }

    let modules: Vec<Module> = input
        .modules
        .into_iter()
        .map(|m| Module {
            id: ModuleId::new(m.id),
            code: m.code,
            name: m.name,
            description: m.description,
            weekly_hours: m.weekly_hours,
            expected_students: m.expected_students.unwrap_or(0),
            program_level: m.program_level,
        })
        .collect();

    let lecturers: Vec<Lecturer> = input
        .lecturers
        .into_iter()
        .map(|l| Lecturer {
            id: LecturerId::new(l.id),
            name: l.name,
            email: l.email,
            specialty: l.specialty,
            max_weekly_hours: l.max_weekly_hours,
            available_timeslots: l
                .available_timeslot_ids
                .into_iter()
                .map(TimeslotId::new)
                .collect(),
        })
        .collect();

    let dataset = Dataset {
        lecturers,
        modules,
        rooms: input.rooms,
        timeslots,
    };
    issues.extend(validate_dataset(&dataset));

    if !issues.is_empty() {
        anyhow::bail!("Invalid dataset: {}", issues.join("; "));
    }
    Ok(dataset)
}

/// Read and parse a dataset file.
pub fn load_dataset_file<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path.display()))?;
    parse_dataset_json_str(&content)
        .with_context(|| format!("Failed to load dataset file {}", path.display()))
}

fn convert_timeslot(raw: &TimeslotInput) -> Result<Timeslot, String> {
    let day: Weekday = raw
        .day
        .parse()
        .map_err(|e| format!("timeslot {}: {}", raw.id, e))?;
    let start_time =
        TimeOfDay::parse(&raw.start_time).map_err(|e| format!("timeslot {}: {}", raw.id, e))?;
    let end_time =
        TimeOfDay::parse(&raw.end_time).map_err(|e| format!("timeslot {}: {}", raw.id, e))?;
    if start_time >= end_time {
        return Err(format!(
            "timeslot {}: start time {} must be before end time {}",
            raw.id, start_time, end_time
        ));
    }
    Ok(Timeslot {
        id: TimeslotId::new(raw.id),
        day,
        start_time,
        end_time,
    })
}

/// Structural checks over typed reference data.
///
/// Returns one message per problem; an empty vector means the dataset is usable.
pub fn validate_dataset(dataset: &Dataset) -> Vec<String> {
    let mut issues = Vec::new();

    let mut timeslot_ids = HashSet::new();
    for timeslot in &dataset.timeslots {
        if !timeslot_ids.insert(timeslot.id) {
            issues.push(format!("Duplicate timeslot ID: {}", timeslot.id));
        }
        if timeslot.start_time >= timeslot.end_time {
            issues.push(format!(
                "timeslot {}: start time must be before end time",
                timeslot.id
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for room in &dataset.rooms {
        if !room_ids.insert(room.id) {
            issues.push(format!("Duplicate room ID: {}", room.id));
        }
    }

    let mut module_ids = HashSet::new();
    let mut module_codes: HashMap<&str, ModuleId> = HashMap::new();
    for module in &dataset.modules {
        if !module_ids.insert(module.id) {
            issues.push(format!("Duplicate module ID: {}", module.id));
        }
        if let Some(other) = module_codes.insert(module.code.as_str(), module.id) {
            issues.push(format!(
                "Duplicate module code {} (modules {} and {})",
                module.code, other, module.id
            ));
        }
    }

    let mut lecturer_ids = HashSet::new();
    for lecturer in &dataset.lecturers {
        if !lecturer_ids.insert(lecturer.id) {
            issues.push(format!("Duplicate lecturer ID: {}", lecturer.id));
        }
        let mut unknown: Vec<i64> = lecturer
            .available_timeslots
            .iter()
            .filter(|id| !timeslot_ids.contains(*id))
            .map(|id| id.value())
            .collect();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            issues.push(format!(
                "lecturer {} references unknown timeslots {:?}",
                lecturer.id, unknown
            ));
        }
    }

    issues
}
