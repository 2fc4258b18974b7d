//! Core domain types
//!
//! These types mirror what the dubbing service reports about a job.
//! They are read-only snapshots: the client never mutates a job.

pub mod job;
