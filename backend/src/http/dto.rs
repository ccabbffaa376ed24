//! Data Transfer Objects for the HTTP API.
//!
//! Ids go out as bare integers, times as `"HH:MM"` and timestamps as ISO-8601.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::Conflict;
use crate::models::{LecturerId, RoomId, RunFilter, RunSummary, ScheduleEntry, Weekday};

/// One stored schedule row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntryDto {
    pub id: i64,
    pub module_id: i64,
    pub lecturer_id: i64,
    pub room_id: i64,
    pub timeslot_id: i64,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub run_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<ScheduleEntry> for ScheduleEntryDto {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            id: entry.id.value(),
            module_id: entry.module_id.value(),
            lecturer_id: entry.lecturer_id.value(),
            room_id: entry.room_id.value(),
            timeslot_id: entry.timeslot_id.value(),
            day: entry.day.to_string(),
            start_time: entry.start_time.to_string(),
            end_time: entry.end_time.to_string(),
            run_id: entry.run_id.to_string(),
            created_at: entry.created_at,
        }
    }
}

/// Response for `POST /v1/schedule/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Entries of the freshly committed run
    pub schedule: Vec<ScheduleEntryDto>,
    /// Every rejected candidate
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummaryDto {
    pub run_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<RunSummary> for RunSummaryDto {
    fn from(run: RunSummary) -> Self {
        Self {
            run_id: run.run_id.to_string(),
            created_at: run.created_at,
        }
    }
}

/// Query parameters for `GET /v1/schedule/runs/{run_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunFilterQuery {
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub lecturer_id: Option<i64>,
    /// Day name, case-insensitive
    #[serde(default)]
    pub day: Option<String>,
}

impl RunFilterQuery {
    pub fn into_filter(self) -> Result<RunFilter, String> {
        let day = self
            .day
            .as_deref()
            .map(str::parse::<Weekday>)
            .transpose()?;
        Ok(RunFilter {
            room_id: self.room_id.map(RoomId::new),
            lecturer_id: self.lecturer_id.map(LecturerId::new),
            day,
        })
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
