//! Service layer for event scheduling.
//!
//! - [`validation`]: turns loosely typed request payloads into typed drafts
//! - [`admission`]: the conflict-checked create/update path
//! - [`error`]: the error taxonomy every service operation reports
//!
//! The remaining event and participant operations carry no scheduling rules
//! and live in [`crate::db::services`].

pub mod admission;
pub mod error;
pub mod validation;

pub use admission::AdmissionController;
pub use error::{SchedulingError, SchedulingResult};
pub use validation::{parse_event_payload, parse_participant_payload};
