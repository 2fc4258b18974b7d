//! TalkDub Core
//!
//! Core types and pure logic for the TalkDub dubbing client.
//!
//! This crate contains:
//! - Domain types: the job status snapshot reported by the service
//! - DTOs: request and response bodies of the jobs API
//! - Validation: checks that run locally before any request is sent
//! - View: the pure mapping from a status snapshot to what gets displayed

pub mod domain;
pub mod dto;
pub mod form;
pub mod validation;
pub mod view;
