//! Factory for creating blob stores from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::storage::{parse_public_base, BlobStore, FsBlobStore, MemoryBlobStore};

/// Create the blob store described by `config`.
///
/// An unparsable public base URL is logged and ignored, which only disables
/// the optional recognizer path for PDFs.
pub fn create_blob_store(config: &ServerConfig) -> Arc<dyn BlobStore> {
    let public_base = config
        .public_base_url
        .as_deref()
        .and_then(|base| match parse_public_base(base) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(base, error = %e, "Ignoring invalid public base URL");
                None
            }
        });

    match &config.blob_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using filesystem blob store");
            let store = FsBlobStore::new(dir.clone());
            Arc::new(match public_base {
                Some(base) => store.with_public_base(base),
                None => store,
            })
        }
        None => {
            info!("Using in-memory blob store");
            let store = MemoryBlobStore::new();
            Arc::new(match public_base {
                Some(base) => store.with_public_base(base),
                None => store,
            })
        }
    }
}
