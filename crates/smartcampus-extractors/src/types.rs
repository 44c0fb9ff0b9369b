//! Core types for document text extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::ExtractResult;

/// Plain-text formats passed through without extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    Txt,
    Md,
}

/// Office Open XML formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfficeFormat {
    /// Word-processing document; text lives in `word/document.xml`.
    Docx,
    /// Presentation; text lives in `ppt/slides/slide<N>.xml`.
    Pptx,
}

/// Dispatch branch chosen from a file's trailing extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    PlainText(TextFormat),
    Pdf,
    Office(OfficeFormat),
    /// Anything else, carrying the lower-cased extension if there was one.
    Unsupported(Option<String>),
}

impl DocumentKind {
    /// Classify a filename or storage path by its lower-cased trailing extension.
    pub fn from_filename(filename: &str) -> Self {
        let name = filename
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(filename);

        let ext = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return DocumentKind::Unsupported(None),
        };

        match ext.as_str() {
            "txt" => DocumentKind::PlainText(TextFormat::Txt),
            "md" => DocumentKind::PlainText(TextFormat::Md),
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Office(OfficeFormat::Docx),
            "pptx" => DocumentKind::Office(OfficeFormat::Pptx),
            _ => DocumentKind::Unsupported(Some(ext)),
        }
    }

    /// Upper-case type label used in placeholder text.
    pub fn label(&self) -> String {
        match self {
            DocumentKind::PlainText(TextFormat::Txt) => "TXT".to_string(),
            DocumentKind::PlainText(TextFormat::Md) => "MD".to_string(),
            DocumentKind::Pdf => "PDF".to_string(),
            DocumentKind::Office(OfficeFormat::Docx) => "DOCX".to_string(),
            DocumentKind::Office(OfficeFormat::Pptx) => "PPTX".to_string(),
            DocumentKind::Unsupported(Some(ext)) => ext.to_ascii_uppercase(),
            DocumentKind::Unsupported(None) => "UNKNOWN".to_string(),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// An uploaded file handed to the pipeline.
#[derive(Debug, Clone)]
pub struct SourceBlob {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Filename or storage path; its extension selects the dispatch branch.
    pub filename: String,
    /// Content type declared by the uploader. Informational only.
    pub declared_type: Option<String>,
    /// Publicly reachable URL of the file, used only by a text recognizer.
    pub public_url: Option<String>,
}

impl SourceBlob {
    /// Create a blob from bytes and a filename.
    pub fn new(bytes: impl Into<Vec<u8>>, filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            declared_type: None,
            public_url: None,
        }
    }

    /// Read a blob from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(bytes, path.to_string_lossy().into_owned()))
    }

    /// Set the declared content type.
    pub fn with_declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into());
        self
    }

    /// Set the public URL.
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = Some(url.into());
        self
    }

    /// Dispatch branch for this blob.
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_filename(&self.filename)
    }
}

/// How the final text was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Plain-text bytes returned verbatim.
    Passthrough,
    /// Text returned by an external text recognizer.
    Recognized,
    /// Text recovered by the byte/XML scanners.
    Heuristic,
    /// Synthetic description substituted for missing content.
    Placeholder,
}

/// Final extraction output. `text` is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted text or placeholder.
    pub text: String,

    /// Dispatch branch that produced it.
    pub kind: DocumentKind,

    /// How the text was obtained.
    pub method: ExtractionMethod,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, kind: DocumentKind, method: ExtractionMethod) -> Self {
        Self {
            text,
            kind,
            method,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether the text is a placeholder rather than real content.
    pub fn is_placeholder(&self) -> bool {
        self.method == ExtractionMethod::Placeholder
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            DocumentKind::from_filename("notes.TXT"),
            DocumentKind::PlainText(TextFormat::Txt)
        );
        assert_eq!(
            DocumentKind::from_filename("readme.md"),
            DocumentKind::PlainText(TextFormat::Md)
        );
        assert_eq!(DocumentKind::from_filename("a/b/lecture.Pdf"), DocumentKind::Pdf);
        assert_eq!(
            DocumentKind::from_filename("essay.docx"),
            DocumentKind::Office(OfficeFormat::Docx)
        );
        assert_eq!(
            DocumentKind::from_filename("slides.pptx"),
            DocumentKind::Office(OfficeFormat::Pptx)
        );
    }

    #[test]
    fn test_kind_unsupported() {
        assert_eq!(
            DocumentKind::from_filename("sheet.xlsx"),
            DocumentKind::Unsupported(Some("xlsx".to_string()))
        );
        assert_eq!(
            DocumentKind::from_filename("Makefile"),
            DocumentKind::Unsupported(None)
        );
        // Dots in directory names do not count as an extension.
        assert_eq!(
            DocumentKind::from_filename("v1.2/README"),
            DocumentKind::Unsupported(None)
        );
    }

    #[test]
    fn test_kind_label() {
        assert_eq!(DocumentKind::Office(OfficeFormat::Docx).label(), "DOCX");
        assert_eq!(DocumentKind::Pdf.to_string(), "PDF");
        assert_eq!(
            DocumentKind::Unsupported(Some("xlsx".to_string())).label(),
            "XLSX"
        );
    }

    #[test]
    fn test_source_blob_builder() {
        let blob = SourceBlob::new(b"hi".to_vec(), "user/notes.md")
            .with_declared_type("text/markdown")
            .with_public_url("https://cdn.example.com/user/notes.md");

        assert_eq!(blob.kind(), DocumentKind::PlainText(TextFormat::Md));
        assert_eq!(blob.declared_type.as_deref(), Some("text/markdown"));
        assert!(blob.public_url.is_some());
    }

    #[tokio::test]
    async fn test_source_blob_from_missing_path() {
        let result = SourceBlob::from_path("/definitely/not/here.pdf").await;
        assert!(matches!(result, Err(crate::ExtractError::Io(_))));
    }
}
