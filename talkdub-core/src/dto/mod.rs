//! Data Transfer Objects for the jobs API
//!
//! Request and response bodies exchanged with the dubbing service over HTTP.

pub mod job;
