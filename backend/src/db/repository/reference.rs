//! Read access to the reference entities the generator consumes.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Lecturer, Module, Room, Timeslot};

/// Supplier of current entity snapshots.
///
/// Every method returns entities in a stable storage order; the generator's
/// output depends on that order.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the backing store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Snapshots ====================

    /// All lecturers, each with their availability set.
    async fn fetch_lecturers(&self) -> RepositoryResult<Vec<Lecturer>>;

    /// All modules.
    async fn fetch_modules(&self) -> RepositoryResult<Vec<Module>>;

    /// All rooms.
    async fn fetch_rooms(&self) -> RepositoryResult<Vec<Room>>;

    /// All timeslots, weekend ones included.
    async fn fetch_timeslots(&self) -> RepositoryResult<Vec<Timeslot>>;

    /// Timeslots eligible for scheduling (Monday to Friday).
    async fn fetch_schedulable_timeslots(&self) -> RepositoryResult<Vec<Timeslot>> {
        let timeslots = self.fetch_timeslots().await?;
        Ok(timeslots.into_iter().filter(|t| !t.is_weekend()).collect())
    }
}
