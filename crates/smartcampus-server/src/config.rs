//! Server configuration loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the REST server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host (default: 0.0.0.0).
    pub host: String,
    /// Bind port (default: 8080).
    pub port: u16,
    /// Directory of the filesystem blob store. `None` keeps blobs in memory.
    pub blob_dir: Option<PathBuf>,
    /// Base URL under which stored blobs are publicly reachable.
    pub public_base_url: Option<String>,
    /// Largest accepted upload in bytes (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// Per-request timeout (default: 180s).
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            blob_dir: None,
            public_base_url: None,
            max_upload_bytes: 10 * 1024 * 1024,
            request_timeout: Duration::from_secs(180),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SMARTCAMPUS_HOST") {
            config.host = host;
        }

        if let Ok(port) = std::env::var("SMARTCAMPUS_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        if let Ok(dir) = std::env::var("SMARTCAMPUS_BLOB_DIR") {
            config.blob_dir = Some(PathBuf::from(dir));
        }

        if let Ok(url) = std::env::var("SMARTCAMPUS_PUBLIC_BASE_URL") {
            config.public_base_url = Some(url);
        }

        if let Ok(bytes) = std::env::var("SMARTCAMPUS_MAX_UPLOAD_BYTES") {
            if let Ok(bytes) = bytes.parse() {
                config.max_upload_bytes = bytes;
            }
        }

        if let Ok(secs) = std::env::var("SMARTCAMPUS_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.request_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// `host:port` bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
