//! Repository trait definitions.
//!
//! Storage is split across two focused traits:
//!
//! - [`reference`]: read-only snapshots of lecturers, modules, rooms and timeslots
//! - [`runs`]: the run store, which owns every persisted schedule entry
//!
//! # Convenience Trait Bound
//!
//! Functions that need both use the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn regenerate<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let lecturers = repo.fetch_lecturers().await?;
//!     let batch = repo.begin_run().await?;
//!     repo.commit_run(batch).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod reference;
pub mod runs;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

pub use reference::ReferenceDataRepository;
pub use runs::RunRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Implemented automatically for any type implementing both traits.
pub trait FullRepository: ReferenceDataRepository + RunRepository {}

impl<T> FullRepository for T where T: ReferenceDataRepository + RunRepository {}
