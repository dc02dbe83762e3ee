//! Application state for the HTTP server.

use std::sync::Arc;

use crate::feed::DatasetCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot cache over the configured guess feed
    pub cache: Arc<DatasetCache>,
}

impl AppState {
    /// Create a new application state around the given cache.
    pub fn new(cache: Arc<DatasetCache>) -> Self {
        Self { cache }
    }
}
