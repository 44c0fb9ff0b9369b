//! smartcampus-server - REST API server binary.

use std::net::SocketAddr;

use smartcampus_extractors::ExtractionPipeline;
use smartcampus_server::{create_blob_store, create_server, AppState, ServerConfig};
use tokio::signal;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive(Level::INFO.into())
                .add_directive("smartcampus_server=debug".parse()?),
        )
        .init();

    let config = ServerConfig::from_env();

    let pipeline = ExtractionPipeline::from_env();
    match pipeline.recognizer_name() {
        Some(name) => info!(recognizer = name, "PDF text recognizer enabled"),
        None => info!("PDF text recognizer disabled, using byte scan only"),
    }

    let store = create_blob_store(&config);
    let state = AppState::new(pipeline, store);
    let app = create_server(state, &config);

    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Starting smartcampus-server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server stopped cleanly");
    Ok(())
}
