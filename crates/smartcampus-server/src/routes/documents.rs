//! Document endpoints: text extraction and raw blob storage.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use smartcampus_extractors::{ExtractionMethod, SourceBlob};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for text extraction.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDocumentRequest {
    /// Storage key of the uploaded file; its extension selects the extractor.
    pub file_path: String,
    /// Content type declared by the uploader.
    #[serde(default)]
    pub file_type: Option<String>,
}

/// Response for text extraction.
#[derive(Debug, Serialize)]
pub struct ParseDocumentResponse {
    /// Extracted text, or a placeholder describing the document.
    pub content: String,
    /// How the content was produced.
    pub method: ExtractionMethod,
}

/// Extract text from a stored document.
/// POST /parse-document
pub async fn parse_document(
    State(state): State<AppState>,
    Json(request): Json<ParseDocumentRequest>,
) -> ApiResult<Json<ParseDocumentResponse>> {
    if request.file_path.trim().is_empty() {
        return Err(ApiError::bad_request("filePath is required"));
    }

    info!(
        file_path = %request.file_path,
        file_type = request.file_type.as_deref().unwrap_or("-"),
        "Parsing document"
    );

    let bytes = state
        .store
        .get(&request.file_path)
        .await
        .map_err(|e| {
            warn!(file_path = %request.file_path, error = %e, "Download failed");
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::not_found("Failed to download file"))?;

    let mut blob = SourceBlob::new(bytes, request.file_path.clone());
    blob.declared_type = request.file_type;
    blob.public_url = state.store.public_url(&request.file_path);

    let content = state.pipeline.extract(&blob).await;

    Ok(Json(ParseDocumentResponse {
        content: content.text,
        method: content.method,
    }))
}

/// Store a document.
/// PUT /documents/*key
pub async fn put_document(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    state.store.put(&key, body.to_vec()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a document.
/// DELETE /documents/*key
pub async fn delete_document(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<StatusCode> {
    if state.store.delete(&key).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Document not found: {}", key)))
    }
}
