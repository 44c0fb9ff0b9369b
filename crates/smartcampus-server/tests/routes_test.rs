//! Integration tests for the REST routes.

use std::io::{Cursor, Write};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use smartcampus_extractors::ExtractionPipeline;
use smartcampus_server::{create_server, AppState, BlobStore, FsBlobStore, MemoryBlobStore, ServerConfig};
use tower::ServiceExt;

const LECTURE: &str = "The French Revolution began in 1789 and reshaped European politics for a century.";

fn app_with(store: Arc<dyn BlobStore>) -> Router {
    let state = AppState::new(ExtractionPipeline::new(), store);
    create_server(state, &ServerConfig::default())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn parse_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/parse-document")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn docx(text: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    write!(writer, "<w:document><w:body><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:body></w:document>", text).unwrap();
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn test_health() {
    let app = app_with(Arc::new(MemoryBlobStore::new()));
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["store"], "memory");
    assert!(json["recognizer"].is_null());
}

#[tokio::test]
async fn test_parse_markdown() {
    let store = Arc::new(MemoryBlobStore::new());
    store.put("u1/notes.md", b"# Week 1\nIntro".to_vec()).await.unwrap();
    let app = app_with(store);

    let (status, json) = send(
        app,
        parse_request(serde_json::json!({ "filePath": "u1/notes.md", "fileType": "text/markdown" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], "# Week 1\nIntro");
    assert_eq!(json["method"], "passthrough");
}

#[tokio::test]
async fn test_parse_docx() {
    let store = Arc::new(MemoryBlobStore::new());
    store.put("u1/history.docx", docx(LECTURE)).await.unwrap();
    let app = app_with(store);

    let (status, json) = send(
        app,
        parse_request(serde_json::json!({ "filePath": "u1/history.docx" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], LECTURE);
    assert_eq!(json["method"], "heuristic");
}

#[tokio::test]
async fn test_parse_unsupported_type() {
    let store = Arc::new(MemoryBlobStore::new());
    store.put("u1/grades.xlsx", b"PK".to_vec()).await.unwrap();
    let app = app_with(store);

    let (status, json) = send(
        app,
        parse_request(serde_json::json!({ "filePath": "u1/grades.xlsx" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["content"],
        "Document: u1/grades.xlsx - Unsupported file type for content extraction."
    );
    assert_eq!(json["method"], "placeholder");
}

#[tokio::test]
async fn test_parse_missing_document() {
    let app = app_with(Arc::new(MemoryBlobStore::new()));

    let (status, json) = send(
        app,
        parse_request(serde_json::json!({ "filePath": "u1/nothing.pdf" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_parse_invalid_key() {
    let app = app_with(Arc::new(MemoryBlobStore::new()));

    let (status, _) = send(
        app,
        parse_request(serde_json::json!({ "filePath": "../etc/passwd.txt" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_then_parse_then_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(dir.path()));

    let put = Request::builder()
        .method(Method::PUT)
        .uri("/documents/u2/reading.txt")
        .body(Body::from(LECTURE))
        .unwrap();
    let (status, _) = send(app_with(store.clone()), put).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(dir.path().join("u2/reading.txt").exists());

    let (status, json) = send(
        app_with(store.clone()),
        parse_request(serde_json::json!({ "filePath": "u2/reading.txt" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["content"], LECTURE);

    let delete = || {
        Request::builder()
            .method(Method::DELETE)
            .uri("/documents/u2/reading.txt")
            .body(Body::empty())
            .unwrap()
    };
    let (status, _) = send(app_with(store.clone()), delete()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app_with(store), delete()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
