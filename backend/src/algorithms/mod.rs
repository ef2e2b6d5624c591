//! Scheduling algorithms that operate on in-memory data only.

pub mod conflicts;

pub use conflicts::{find_conflicting_event, first_conflict, has_conflict, ConflictReport};
