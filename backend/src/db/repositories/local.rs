//! In-memory local repository implementation.
//!
//! Holds the reference entities and the current run in memory behind a single
//! lock. Used by the server out of the box (seeded from a dataset file) and by
//! every test that needs a repository.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use parking_lot::RwLock;

use crate::db::repository::*;
use crate::models::{
    load_dataset_file, validate_dataset, Dataset, Lecturer, Module, Room, RunBatch, RunId,
    RunSummary, ScheduleEntry, ScheduleEntryId, Timeslot,
};

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same storage.
///
/// # Example
/// ```
/// use timetable_engine::db::repositories::LocalRepository;
/// use timetable_engine::models::Dataset;
///
/// let repo = LocalRepository::new();
/// repo.load_dataset(Dataset::default()).unwrap();
/// assert_eq!(repo.entry_count(), 0);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    lecturers: Vec<Lecturer>,
    modules: Vec<Module>,
    rooms: Vec<Room>,
    timeslots: Vec<Timeslot>,

    // Current run, in storage order
    entries: Vec<ScheduleEntry>,
    next_entry_id: i64,

    // Failure injection
    is_healthy: bool,
    reject_commits: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            lecturers: Vec::new(),
            modules: Vec::new(),
            rooms: Vec::new(),
            timeslots: Vec::new(),
            entries: Vec::new(),
            next_entry_id: 1,
            is_healthy: true,
            reject_commits: false,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository holding `dataset` as its reference data.
    pub fn with_dataset(dataset: Dataset) -> RepositoryResult<Self> {
        let repo = Self::new();
        repo.load_dataset(dataset)?;
        Ok(repo)
    }

    /// Create a repository seeded from a JSON dataset file.
    pub fn from_dataset_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let dataset = load_dataset_file(path).map_err(|e| {
            RepositoryError::validation(
                format!("{:#}", e),
                ErrorContext::new("load_dataset")
                    .with_entity("dataset")
                    .with_entity_id(path.display()),
            )
        })?;
        info!(
            "Loaded dataset from {}: {} lecturers, {} modules, {} rooms, {} timeslots",
            path.display(),
            dataset.lecturers.len(),
            dataset.modules.len(),
            dataset.rooms.len(),
            dataset.timeslots.len()
        );
        Self::with_dataset(dataset)
    }

    /// Replace all reference data. Stored runs are kept.
    pub fn load_dataset(&self, dataset: Dataset) -> RepositoryResult<()> {
        let issues = validate_dataset(&dataset);
        if !issues.is_empty() {
            return Err(RepositoryError::validation(
                issues.join("; "),
                ErrorContext::new("load_dataset").with_entity("dataset"),
            ));
        }

        let Dataset {
            lecturers,
            modules,
            rooms,
            timeslots,
        } = dataset;
        let mut data = self.data.write();
        data.lecturers = lecturers;
        data.modules = modules;
        data.rooms = rooms;
        data.timeslots = timeslots;
        Ok(())
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make every subsequent commit fail, for testing rollback behaviour.
    pub fn set_reject_commits(&self, reject: bool) {
        self.data.write().reject_commits = reject;
    }

    /// Number of schedule entries currently stored.
    pub fn entry_count(&self) -> usize {
        self.data.read().entries.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        ensure_healthy(&self.data.read(), operation)
    }
}

fn ensure_healthy(data: &LocalData, operation: &str) -> RepositoryResult<()> {
    if !data.is_healthy {
        return Err(RepositoryError::connection(
            "Local repository is not healthy",
            ErrorContext::new(operation),
        ));
    }
    Ok(())
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReferenceDataRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn fetch_lecturers(&self) -> RepositoryResult<Vec<Lecturer>> {
        self.check_health("fetch_lecturers")?;
        Ok(self.data.read().lecturers.clone())
    }

    async fn fetch_modules(&self) -> RepositoryResult<Vec<Module>> {
        self.check_health("fetch_modules")?;
        Ok(self.data.read().modules.clone())
    }

    async fn fetch_rooms(&self) -> RepositoryResult<Vec<Room>> {
        self.check_health("fetch_rooms")?;
        Ok(self.data.read().rooms.clone())
    }

    async fn fetch_timeslots(&self) -> RepositoryResult<Vec<Timeslot>> {
        self.check_health("fetch_timeslots")?;
        Ok(self.data.read().timeslots.clone())
    }
}

#[async_trait]
impl RunRepository for LocalRepository {
    async fn begin_run(&self) -> RepositoryResult<RunBatch> {
        self.check_health("begin_run")?;
        Ok(RunBatch::begin())
    }

    async fn commit_run(&self, batch: RunBatch) -> RepositoryResult<RunSummary> {
        let (run_id, created_at, assignments) = batch.into_parts();

        // Validate, build and swap under one write lock so readers never see
        // an empty store or a mix of two runs.
        let mut data = self.data.write();
        ensure_healthy(&data, "commit_run")?;
        if data.reject_commits {
            return Err(RepositoryError::transaction(
                "Commit rejected by store",
                ErrorContext::new("commit_run")
                    .with_entity("run")
                    .with_entity_id(&run_id),
            ));
        }

        let first_id = data.next_entry_id;
        let entries: Vec<ScheduleEntry> = assignments
            .into_iter()
            .zip(first_id..)
            .map(|(assignment, id)| {
                ScheduleEntry::from_assignment(
                    ScheduleEntryId::new(id),
                    assignment,
                    &run_id,
                    created_at,
                )
            })
            .collect();

        let replaced = data.entries.len();
        data.next_entry_id = first_id + entries.len() as i64;
        data.entries = entries;
        debug!(
            "Committed run {} ({} entries, replaced {})",
            run_id,
            data.entries.len(),
            replaced
        );

        Ok(RunSummary { run_id, created_at })
    }

    async fn abort_run(&self, batch: RunBatch) -> RepositoryResult<()> {
        debug!(
            "Aborted run {} ({} pending assignments discarded)",
            batch.run_id(),
            batch.len()
        );
        Ok(())
    }

    async fn list_runs(&self) -> RepositoryResult<Vec<RunSummary>> {
        self.check_health("list_runs")?;
        let data = self.data.read();

        let mut runs: Vec<RunSummary> = Vec::new();
        for entry in &data.entries {
            match runs.iter_mut().find(|r| r.run_id == entry.run_id) {
                Some(run) => run.created_at = run.created_at.min(entry.created_at),
                None => runs.push(RunSummary {
                    run_id: entry.run_id.clone(),
                    created_at: entry.created_at,
                }),
            }
        }

        runs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.run_id.cmp(&b.run_id))
        });
        Ok(runs)
    }

    async fn get_run(&self, run_id: &RunId) -> RepositoryResult<Vec<ScheduleEntry>> {
        self.check_health("get_run")?;
        Ok(self
            .data
            .read()
            .entries
            .iter()
            .filter(|e| &e.run_id == run_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Assignment, LecturerId, ModuleId, RoomId, TimeOfDay, TimeslotId, Weekday,
    };
    use std::collections::HashSet;

    fn timeslot(id: i64, day: Weekday) -> Timeslot {
        Timeslot {
            id: TimeslotId::new(id),
            day,
            start_time: TimeOfDay::from_hm(9, 0).unwrap(),
            end_time: TimeOfDay::from_hm(10, 0).unwrap(),
        }
    }

    fn batch_with(count: i64) -> RunBatch {
        let mut batch = RunBatch::begin();
        for id in 1..=count {
            batch.push(Assignment {
                module_id: ModuleId::new(1),
                lecturer_id: LecturerId::new(1),
                room_id: RoomId::new(id),
                timeslot: timeslot(1, Weekday::Monday),
            });
        }
        batch
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
        assert!(matches!(
            repo.fetch_rooms().await,
            Err(RepositoryError::ConnectionError { .. })
        ));
    }

    #[tokio::test]
    async fn test_schedulable_timeslots_skip_weekend() {
        let repo = LocalRepository::with_dataset(Dataset {
            timeslots: vec![
                timeslot(1, Weekday::Friday),
                timeslot(2, Weekday::Saturday),
                timeslot(3, Weekday::Sunday),
            ],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(repo.fetch_timeslots().await.unwrap().len(), 3);
        let schedulable = repo.fetch_schedulable_timeslots().await.unwrap();
        assert_eq!(schedulable.len(), 1);
        assert_eq!(schedulable[0].id, TimeslotId::new(1));
    }

    #[tokio::test]
    async fn test_load_dataset_rejects_duplicates() {
        let repo = LocalRepository::new();
        let dataset = Dataset {
            timeslots: vec![timeslot(1, Weekday::Monday), timeslot(1, Weekday::Tuesday)],
            ..Default::default()
        };

        let err = repo.load_dataset(dataset).unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert!(repo.fetch_timeslots().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commit_replaces_previous_run() {
        let repo = LocalRepository::new();

        let first = repo.commit_run(batch_with(2)).await.unwrap();
        let second = repo.commit_run(batch_with(3)).await.unwrap();

        assert!(repo.get_run(&first.run_id).await.unwrap().is_empty());
        assert_eq!(repo.get_run(&second.run_id).await.unwrap().len(), 3);
        assert_eq!(repo.list_runs().await.unwrap(), vec![second]);
        assert_eq!(repo.entry_count(), 3);
    }

    #[tokio::test]
    async fn test_entry_ids_are_unique_across_runs() {
        let repo = LocalRepository::new();
        let first = repo.commit_run(batch_with(2)).await.unwrap();
        let first_ids: HashSet<_> = repo
            .get_run(&first.run_id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();

        let second = repo.commit_run(batch_with(2)).await.unwrap();
        let second_ids: Vec<_> = repo
            .get_run(&second.run_id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id.value())
            .collect();

        assert_eq!(second_ids, vec![3, 4]);
        assert!(second_ids
            .iter()
            .all(|id| !first_ids.contains(&ScheduleEntryId::new(*id))));
    }

    #[tokio::test]
    async fn test_rejected_commit_keeps_previous_run() {
        let repo = LocalRepository::new();
        let kept = repo.commit_run(batch_with(2)).await.unwrap();

        repo.set_reject_commits(true);
        let err = repo.commit_run(batch_with(5)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::TransactionError { .. }));

        assert_eq!(repo.list_runs().await.unwrap(), vec![kept.clone()]);
        assert_eq!(repo.get_run(&kept.run_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_abort_leaves_store_untouched() {
        let repo = LocalRepository::new();
        let kept = repo.commit_run(batch_with(1)).await.unwrap();

        let batch = repo.begin_run().await.unwrap();
        repo.abort_run(batch).await.unwrap();

        assert_eq!(repo.list_runs().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_unknown_run_is_empty() {
        let repo = LocalRepository::new();
        let entries = repo.get_run(&RunId::new("missing")).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_empty_commit_lists_no_run() {
        let repo = LocalRepository::new();
        repo.commit_run(batch_with(2)).await.unwrap();
        repo.commit_run(RunBatch::begin()).await.unwrap();

        assert!(repo.list_runs().await.unwrap().is_empty());
        assert_eq!(repo.entry_count(), 0);
    }
}
