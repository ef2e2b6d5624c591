//! Validated event candidates.

use serde::{Deserialize, Serialize};

use super::window::TimeWindow;

/// A create or update request after validation.
///
/// Holding an `EventDraft` means every required field was present and well
/// formed, and that `window.start <= window.end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub window: TimeWindow,
    pub description: Option<String>,
}

impl EventDraft {
    pub fn new(name: impl Into<String>, window: TimeWindow, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            window,
            description,
        }
    }

    pub fn location(&self) -> &str {
        &self.window.location
    }
}
