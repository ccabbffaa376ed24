//! Repository implementations.
//!
//! - `local`: in-memory implementation, seeded from a dataset file
pub mod local;

pub use local::LocalRepository;
