//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during content extraction.
///
/// Only [`ExtractError::Io`] ever reaches callers of the pipeline; every other
/// variant is recovered locally into placeholder text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The OOXML zip container is malformed.
    #[error("Container format error: {0}")]
    ContainerFormat(String),

    /// Bytes could not be treated as text. Scanners decode lossily, so this
    /// is never produced by the pipeline itself.
    #[error("Decode error: {0}")]
    Decode(String),

    /// File extension outside the known set.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The optional text recognizer failed, timed out, or returned too little.
    #[error("Enhancement unavailable: {0}")]
    EnhancementUnavailable(String),

    /// IO error while reading the input.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ExtractError::ContainerFormat(err.to_string())
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
