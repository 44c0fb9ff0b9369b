//! Byte-addressable blob store holding uploaded documents.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

/// Errors from blob store operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key is empty, absolute, or escapes the store root.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// IO error from the backing store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Blob store keyed by storage path, e.g. `user-id/lecture.pdf`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a blob. `Ok(None)` when the key does not exist.
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Store a blob, replacing any existing one.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> StorageResult<()>;

    /// Delete a blob. Returns whether it existed.
    async fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Publicly reachable URL for a key, if the store is exposed.
    fn public_url(&self, key: &str) -> Option<String>;

    /// Human-readable name for this store.
    fn name(&self) -> &str;
}

/// Reject keys that are empty, absolute, or contain `.`/`..` segments.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");

    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

fn join_public_url(base: Option<&Url>, key: &str) -> Option<String> {
    base.and_then(|b| b.join(key).ok()).map(|u| u.to_string())
}

/// Parse a public base URL, making sure it ends with `/` so keys append.
pub fn parse_public_base(base: &str) -> Result<Url, url::ParseError> {
    if base.ends_with('/') {
        Url::parse(base)
    } else {
        Url::parse(&format!("{}/", base))
    }
}

/// In-memory store for tests and local development.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    public_base: Option<Url>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose blobs under a public base URL.
    pub fn with_public_base(mut self, base: Url) -> Self {
        self.public_base = Some(base);
        self
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> StorageResult<()> {
        validate_key(key)?;
        self.blobs.write().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        Ok(self.blobs.write().await.remove(key).is_some())
    }

    fn public_url(&self, key: &str) -> Option<String> {
        join_public_url(self.public_base.as_ref(), key)
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Store backed by a directory on the local filesystem.
pub struct FsBlobStore {
    root: PathBuf,
    public_base: Option<Url>,
}

impl FsBlobStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            public_base: None,
        }
    }

    /// Expose blobs under a public base URL.
    pub fn with_public_base(mut self, base: Url) -> Self {
        self.public_base = Some(base);
        self
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> StorageResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        debug!(key, path = %path.display(), "Stored blob");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<bool> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> Option<String> {
        join_public_url(self.public_base.as_ref(), key)
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("user/lecture.pdf").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("user/../secret").is_err());
        assert!(validate_key("user//x").is_err());
        assert!(validate_key("a\\b").is_err());
    }

    #[test]
    fn test_public_url() {
        let base = parse_public_base("https://cdn.example.com/storage/documents").unwrap();
        let store = MemoryBlobStore::new().with_public_base(base);
        assert_eq!(
            store.public_url("u1/notes.pdf").as_deref(),
            Some("https://cdn.example.com/storage/documents/u1/notes.pdf")
        );
        assert!(MemoryBlobStore::new().public_url("u1/notes.pdf").is_none());
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryBlobStore::new();
        store.put("a/b.txt", b"hello".to_vec()).await.unwrap();

        assert_eq!(store.get("a/b.txt").await.unwrap(), Some(b"hello".to_vec()));
        assert!(store.delete("a/b.txt").await.unwrap());
        assert!(!store.delete("a/b.txt").await.unwrap());
        assert_eq!(store.get("a/b.txt").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fs_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());

        assert_eq!(store.get("u1/missing.pdf").await.unwrap(), None);

        store.put("u1/doc.md", b"# Title".to_vec()).await.unwrap();
        assert!(dir.path().join("u1/doc.md").exists());
        assert_eq!(store.get("u1/doc.md").await.unwrap(), Some(b"# Title".to_vec()));

        assert!(store.delete("u1/doc.md").await.unwrap());
        assert!(!store.delete("u1/doc.md").await.unwrap());
    }

    #[tokio::test]
    async fn test_fs_store_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsBlobStore::new(dir.path());
        let result = store.get("../outside.txt").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
