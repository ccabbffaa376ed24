//! High-level service layer.
//!
//! Repository-agnostic operations that the HTTP layer (and any other caller)
//! should use instead of talking to the repository traits directly.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  HTTP handlers / binaries                            │
//! └───────────────────┬──────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────┐
//! │  Service Layer (services.rs)                         │
//! │  - generation serialization and run lifecycle        │
//! │  - run listing and filtering                         │
//! └───────────────────┬──────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────┐
//! │  ReferenceDataRepository + RunRepository             │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use timetable_engine::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::from_dataset_file("data/sample_dataset.json")?;
//!     let result = services::generate_timetable(&repo).await?;
//!     println!("{} entries, {} conflicts", result.schedule.len(), result.conflicts.len());
//!     Ok(())
//! }
//! ```

use log::{info, warn};
use tokio::sync::Mutex;

use super::repository::{FullRepository, RepositoryResult};
use crate::models::{Conflict, Dataset, RunFilter, RunId, RunSummary, ScheduleEntry};
use crate::scheduler::generate_schedule;

/// Held around snapshot, generate, commit and re-read, so at most one
/// generation is in flight per process.
static GENERATION_LOCK: Mutex<()> = Mutex::const_new(());

/// Outcome of one generation call.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// The committed run.
    pub run: RunSummary,
    /// Entries of the committed run, as re-read from the store.
    pub schedule: Vec<ScheduleEntry>,
    /// Every rejected candidate, in the order the generator met them.
    pub conflicts: Vec<Conflict>,
}

// ==================== Health & Connection ====================

/// Pass-through to the repository's health check.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Generation ====================

/// Pull a consistent snapshot of everything the generator needs.
///
/// Timeslots are the schedulable ones only; weekend slots never reach the
/// generator.
pub async fn load_snapshot<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Dataset> {
    let lecturers = repo.fetch_lecturers().await?;
    let modules = repo.fetch_modules().await?;
    let rooms = repo.fetch_rooms().await?;
    let timeslots = repo.fetch_schedulable_timeslots().await?;

    Ok(Dataset {
        lecturers,
        modules,
        rooms,
        timeslots,
    })
}

/// Generate a new timetable and store it as the current run.
///
/// The previous run is replaced on success. Infeasible demand is not an
/// error: it shows up in `conflicts` and as missing entries. Any repository
/// failure aborts the call and leaves the previously stored run untouched.
pub async fn generate_timetable<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<GenerationResult> {
    let _guard = GENERATION_LOCK.lock().await;

    let mut batch = repo
        .begin_run()
        .await
        .map_err(|e| e.with_operation("generate_timetable"))?;

    let snapshot = match load_snapshot(repo).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Snapshot for run {} failed: {}", batch.run_id(), e);
            repo.abort_run(batch).await?;
            return Err(e.with_operation("generate_timetable"));
        }
    };

    info!(
        "Generating run {}: {} modules, {} lecturers, {} rooms, {} timeslots",
        batch.run_id(),
        snapshot.modules.len(),
        snapshot.lecturers.len(),
        snapshot.rooms.len(),
        snapshot.timeslots.len()
    );

    let conflicts = generate_schedule(&snapshot, &mut batch);
    let accepted = batch.len();

    let run = match repo.commit_run(batch).await {
        Ok(run) => run,
        Err(e) => {
            warn!("Commit failed, previous run kept: {}", e);
            return Err(e.with_operation("generate_timetable"));
        }
    };
    let schedule = repo.get_run(&run.run_id).await?;

    if schedule.len() != accepted {
        warn!(
            "Run {} re-read {} entries, expected {}",
            run.run_id,
            schedule.len(),
            accepted
        );
    }
    info!(
        "Run {} committed: {} entries, {} conflicts",
        run.run_id,
        schedule.len(),
        conflicts.len()
    );

    Ok(GenerationResult {
        run,
        schedule,
        conflicts,
    })
}

// ==================== Run Queries ====================

/// One summary per stored run, newest first.
pub async fn list_runs<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<RunSummary>> {
    repo.list_runs().await
}

/// All entries of `run_id`; empty when the run is unknown.
pub async fn get_run<R: FullRepository + ?Sized>(
    repo: &R,
    run_id: &RunId,
) -> RepositoryResult<Vec<ScheduleEntry>> {
    repo.get_run(run_id).await
}

/// Entries of `run_id` narrowed by `filter`, storage order preserved.
pub async fn get_run_filtered<R: FullRepository + ?Sized>(
    repo: &R,
    run_id: &RunId,
    filter: &RunFilter,
) -> RepositoryResult<Vec<ScheduleEntry>> {
    let entries = repo.get_run(run_id).await?;
    if filter.is_empty() {
        return Ok(entries);
    }
    Ok(entries.into_iter().filter(|e| filter.matches(e)).collect())
}
