//! Route definitions for the REST API.

mod documents;
mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Text extraction
        .route("/parse-document", post(documents::parse_document))
        // Blob store access
        .route(
            "/documents/*key",
            put(documents::put_document).delete(documents::delete_document),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        // Attach state
        .with_state(state)
}

pub use documents::*;
pub use health::*;
