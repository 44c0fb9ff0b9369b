//! Middleware for the REST API server.

use axum::{extract::Request, http::header, middleware::Next, response::Response};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

/// CORS for the browser client, which calls from its own origin.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Log each request with its upload size and latency. Health probes are
/// logged at debug level only.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let upload_bytes = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if path == "/health" {
        debug!(%method, %path, status, duration_ms, "Health probe");
    } else {
        info!(%method, %path, status, upload_bytes, duration_ms, "Request completed");
    }

    response
}
