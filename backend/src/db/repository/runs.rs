//! Run store trait.
//!
//! A run is every [`ScheduleEntry`] sharing one run id. Runs are written only
//! through a [`RunBatch`]: the batch is opened, filled by the generator and
//! then either committed, replacing whatever was stored before, or aborted.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{RunBatch, RunId, RunSummary, ScheduleEntry};

#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Open a new, empty batch under a fresh run id.
    ///
    /// Nothing is written until [`commit_run`](Self::commit_run).
    async fn begin_run(&self) -> RepositoryResult<RunBatch>;

    /// Persist `batch` as the current run.
    ///
    /// All previously stored entries are removed in the same step. Readers see
    /// either the old run or the new one, never both and never neither. On
    /// error the store is left exactly as it was.
    ///
    /// # Returns
    /// * `Ok(RunSummary)` - Id and timestamp of the committed run
    /// * `Err(RepositoryError::TransactionError)` - If the commit was rejected
    async fn commit_run(&self, batch: RunBatch) -> RepositoryResult<RunSummary>;

    /// Discard `batch` without touching the store.
    async fn abort_run(&self, batch: RunBatch) -> RepositoryResult<()>;

    /// One summary per stored run, newest first.
    async fn list_runs(&self) -> RepositoryResult<Vec<RunSummary>>;

    /// All entries of `run_id` in storage order. Unknown ids yield an empty vector.
    async fn get_run(&self, run_id: &RunId) -> RepositoryResult<Vec<ScheduleEntry>>;
}
