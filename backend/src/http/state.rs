//! Application state for the HTTP server.

use std::sync::Arc;

use crate::store::Dataset;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated.
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }
}
