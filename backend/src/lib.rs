//! # Timetable Engine
//!
//! Greedy university timetable generation with an immutable run store.
//!
//! Given lecturers (with availability and a weekly cap), modules (with weekly
//! hours and class size), rooms (with capacity) and weekday timeslots, the
//! engine assigns modules to (lecturer, room, timeslot) triples, reports every
//! rejected candidate as a conflict, and stores the result as a "run" that
//! replaces the previous one.
//!
//! ## Architecture
//!
//! - [`models`]: Strongly typed entities, run types and dataset loading
//! - [`scheduler`]: Constraint checks and the greedy generator
//! - [`db`]: Repository traits, the in-memory repository and the service layer
//! - [`http`]: Axum-based HTTP server and request handlers

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod db;
pub mod models;
pub mod scheduler;

#[cfg(feature = "http-server")]
pub mod http;
