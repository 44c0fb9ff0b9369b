//! Server state management.

use std::sync::Arc;

use smartcampus_extractors::ExtractionPipeline;

use crate::storage::BlobStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ExtractionPipeline>,
    pub store: Arc<dyn BlobStore>,
}

impl AppState {
    /// Create state from a pipeline and a blob store.
    pub fn new(pipeline: ExtractionPipeline, store: Arc<dyn BlobStore>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            store,
        }
    }
}
