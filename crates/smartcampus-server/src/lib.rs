//! smartcampus-server - REST API around the document text extractor.
//!
//! Reads uploaded course documents from a blob store and returns their text
//! for summarization, chat, and quiz generation.
//!
//! # Example
//!
//! ```ignore
//! use smartcampus_server::{create_blob_store, create_server, AppState, ServerConfig};
//! use smartcampus_extractors::ExtractionPipeline;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::from_env();
//!     let state = AppState::new(ExtractionPipeline::from_env(), create_blob_store(&config));
//!     let app = create_server(state, &config);
//!
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr()).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use factory::create_blob_store;
pub use state::AppState;
pub use storage::{BlobStore, FsBlobStore, MemoryBlobStore, StorageError};

use axum::{middleware as axum_middleware, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState, config: &ServerConfig) -> Router {
    routes::create_router(state, config.max_upload_bytes)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
