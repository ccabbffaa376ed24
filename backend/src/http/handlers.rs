//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::dto::{
    GenerateResponse, HealthResponse, RunFilterQuery, RunSummaryDto, ScheduleEntryDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::RunId;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository
/// is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Schedule Generation
// =============================================================================

/// POST /v1/schedule/generate
///
/// Generate a new timetable, replacing the stored run, and return it together
/// with the conflict log.
pub async fn generate_schedule(State(state): State<AppState>) -> HandlerResult<GenerateResponse> {
    let result = db_services::generate_timetable(state.repository.as_ref())
        .await
        .map_err(AppError::Generation)?;

    Ok(Json(GenerateResponse {
        schedule: result.schedule.into_iter().map(Into::into).collect(),
        conflicts: result.conflicts,
    }))
}

// =============================================================================
// Run Queries
// =============================================================================

/// GET /v1/schedule/runs
///
/// List stored runs, newest first.
pub async fn list_runs(State(state): State<AppState>) -> HandlerResult<Vec<RunSummaryDto>> {
    let runs = db_services::list_runs(state.repository.as_ref()).await?;
    Ok(Json(runs.into_iter().map(Into::into).collect()))
}

/// GET /v1/schedule/runs/{run_id}
///
/// Entries of one run, optionally narrowed by `room_id`, `lecturer_id` and
/// `day`. An unknown run yields an empty list.
pub async fn get_run(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
    Query(query): Query<RunFilterQuery>,
) -> HandlerResult<Vec<ScheduleEntryDto>> {
    let filter = query.into_filter().map_err(AppError::BadRequest)?;
    let run_id = RunId::new(run_id);

    let entries =
        db_services::get_run_filtered(state.repository.as_ref(), &run_id, &filter).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
