//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::AdmissionController;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for reads, deletes and participants
    pub repository: Arc<dyn FullRepository>,
    /// Conflict-checked event writes, sharing the same repository
    pub admission: AdmissionController,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        let admission = AdmissionController::new(repository.clone());
        Self {
            repository,
            admission,
        }
    }
}
