//! # Venue Events Backend
//!
//! Scheduling service for events held at physical locations.
//!
//! This crate stores events and the participants registered to attend them, and
//! refuses to place two events at the same location on the same date with
//! overlapping time windows. The backend exposes a REST API via Axum.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Records and request payloads shared by every layer
//! - [`models`]: The time window model and validated event drafts
//! - [`algorithms`]: Overlap detection against the committed set
//! - [`services`]: Admission control, payload validation and error taxonomy
//! - [`db`]: Repository pattern, storage backends and configuration
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Admission
//!
//! Every write that places an event goes through
//! [`services::AdmissionController`]:
//!
//! ```text
//! payload ──► validation ──► EventDraft ──► AdmissionController
//!                                              │
//!                          events_at(location, date)
//!                                              │
//!                                     has_conflict? ──► Conflict
//!                                              │
//!                                       insert / update
//! ```

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod algorithms;
pub mod db;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
