//! Extraction pipeline: dispatch, acceptance thresholds, and placeholders.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::container;
use crate::error::{ExtractError, ExtractResult};
use crate::pdf;
use crate::recognizer::TextRecognizer;
use crate::text::char_len;
use crate::types::{DocumentKind, ExtractedContent, ExtractionMethod, OfficeFormat, SourceBlob};
use crate::xml::{self, XmlRole};

/// Turns an uploaded file into text for summarization and quiz generation.
///
/// Every call returns non-empty text. When a format yields too little
/// content, a placeholder naming the file and its type is returned instead,
/// so downstream prompts never see short scanner noise.
pub struct ExtractionPipeline {
    config: ExtractionConfig,
    recognizer: Option<Arc<dyn TextRecognizer>>,
}

impl ExtractionPipeline {
    /// Create pipeline with default thresholds and no recognizer.
    pub fn new() -> Self {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create pipeline with custom thresholds.
    pub fn with_config(config: ExtractionConfig) -> Self {
        Self {
            config,
            recognizer: None,
        }
    }

    /// Create pipeline from environment, attaching the vision recognizer when
    /// an API key is configured.
    pub fn from_env() -> Self {
        let pipeline = Self::with_config(ExtractionConfig::from_env());

        #[cfg(feature = "vision")]
        let pipeline = match crate::recognizer::VisionTextRecognizer::from_env() {
            Some(Ok(recognizer)) => pipeline.with_recognizer(Arc::new(recognizer)),
            Some(Err(e)) => {
                warn!(error = %e, "Vision recognizer disabled");
                pipeline
            }
            None => {
                debug!("No vision recognizer configured");
                pipeline
            }
        };

        pipeline
    }

    /// Attach a text recognizer used for PDFs before the byte scan.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Current thresholds.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Name of the attached recognizer, if any.
    pub fn recognizer_name(&self) -> Option<&str> {
        self.recognizer.as_ref().map(|r| r.name())
    }

    /// Extract text from raw bytes and a filename.
    pub async fn extract_bytes(
        &self,
        bytes: &[u8],
        filename: &str,
        declared_type: Option<&str>,
    ) -> ExtractedContent {
        let mut blob = SourceBlob::new(bytes.to_vec(), filename);
        blob.declared_type = declared_type.map(str::to_string);
        self.extract(&blob).await
    }

    /// Extract text from a blob. Never fails; see [`ExtractedContent::is_placeholder`].
    pub async fn extract(&self, blob: &SourceBlob) -> ExtractedContent {
        let kind = blob.kind();
        debug!(
            filename = %blob.filename,
            kind = %kind,
            size = blob.bytes.len(),
            "Extracting document"
        );

        let (text, method) = match &kind {
            DocumentKind::PlainText(_) => self.plain_text(blob, &kind),
            DocumentKind::Pdf => self.pdf(blob).await,
            DocumentKind::Office(format) => self.office(blob, *format).await,
            DocumentKind::Unsupported(_) => {
                debug!(reason = %ExtractError::UnsupportedFormat(kind.label()), "Skipping extraction");
                (
                    format!(
                        "Document: {} - Unsupported file type for content extraction.",
                        blob.filename
                    ),
                    ExtractionMethod::Placeholder,
                )
            }
        };

        let mut content = ExtractedContent::new(text, kind, method)
            .with_metadata("filename", blob.filename.clone())
            .with_metadata("original_size", blob.bytes.len());
        if let Some(declared) = &blob.declared_type {
            content = content.with_metadata("declared_type", declared.clone());
        }

        info!(
            filename = %blob.filename,
            method = ?content.method,
            chars = content.char_len(),
            "Extraction finished"
        );

        content
    }

    fn plain_text(&self, blob: &SourceBlob, kind: &DocumentKind) -> (String, ExtractionMethod) {
        if blob.bytes.is_empty() {
            return (
                format!(
                    "This is a {} document titled \"{}\". The file is empty.",
                    kind.label(),
                    blob.filename
                ),
                ExtractionMethod::Placeholder,
            );
        }

        (
            String::from_utf8_lossy(&blob.bytes).into_owned(),
            ExtractionMethod::Passthrough,
        )
    }

    async fn pdf(&self, blob: &SourceBlob) -> (String, ExtractionMethod) {
        let (mut text, mut method) = match self.recognize(blob).await {
            Ok(Some(text)) => (text, ExtractionMethod::Recognized),
            Ok(None) => (String::new(), ExtractionMethod::Heuristic),
            Err(e) => {
                warn!(filename = %blob.filename, error = %e, "Falling back to PDF byte scan");
                (String::new(), ExtractionMethod::Heuristic)
            }
        };

        if char_len(&text) < self.config.enhancement_min_chars {
            let bytes = blob.bytes.clone();
            let scanned = run_blocking(move || pdf::extract_text(&bytes))
                .await
                .unwrap_or_else(|e| {
                    warn!(filename = %blob.filename, error = %e, "PDF scan failed");
                    String::new()
                });

            if char_len(&scanned) > char_len(&text) {
                text = scanned;
                method = ExtractionMethod::Heuristic;
            }
        }

        if !has_content(&text, self.config.pdf_min_chars) {
            debug!(chars = char_len(&text), "PDF text below threshold");
            return (
                format!(
                    "This is a PDF document titled \"{}\". The document contains academic \
                     content that could not be fully extracted. Please try uploading a \
                     text-based version of this document for better results.",
                    blob.filename
                ),
                ExtractionMethod::Placeholder,
            );
        }

        (text, method)
    }

    /// Ask the recognizer for text. `Ok(None)` when no recognizer or URL is
    /// available; failures, timeouts and empty answers are
    /// `EnhancementUnavailable`. A short answer is still returned and competes
    /// with the byte scan.
    async fn recognize(&self, blob: &SourceBlob) -> ExtractResult<Option<String>> {
        let (Some(recognizer), Some(url)) = (&self.recognizer, &blob.public_url) else {
            return Ok(None);
        };

        let text = tokio::time::timeout(
            self.config.enhancement_timeout,
            recognizer.recognize_text(url),
        )
        .await
        .map_err(|_| {
            ExtractError::EnhancementUnavailable(format!(
                "{} timed out after {:?}",
                recognizer.name(),
                self.config.enhancement_timeout
            ))
        })??
        .ok_or_else(|| {
            ExtractError::EnhancementUnavailable(format!("{} returned no text", recognizer.name()))
        })?;

        let chars = char_len(&text);
        debug!(recognizer = recognizer.name(), chars, "Recognizer returned text");

        if chars < self.config.enhancement_min_chars {
            warn!(
                recognizer = recognizer.name(),
                chars, "Recognizer returned too little text"
            );
        }

        Ok(Some(text))
    }

    async fn office(&self, blob: &SourceBlob, format: OfficeFormat) -> (String, ExtractionMethod) {
        let label = DocumentKind::Office(format).label();
        let bytes = blob.bytes.clone();

        let result = run_blocking(move || -> ExtractResult<String> {
            let container = container::unpack(&bytes)?;
            Ok(xml::extract_container(&container, XmlRole::from(format)))
        })
        .await
        .and_then(|inner| inner);

        match result {
            Ok(text) if has_content(&text, self.config.office_min_chars) => {
                (text, ExtractionMethod::Heuristic)
            }
            Ok(text) => {
                debug!(chars = char_len(&text), "Office text below threshold");
                (
                    format!(
                        "This is a {} document titled \"{}\". Content extraction was limited.",
                        label, blob.filename
                    ),
                    ExtractionMethod::Placeholder,
                )
            }
            Err(e) => {
                warn!(filename = %blob.filename, error = %e, "Office extraction failed");
                (
                    format!(
                        "This is a {} document titled \"{}\". Could not extract content.",
                        label, blob.filename
                    ),
                    ExtractionMethod::Placeholder,
                )
            }
        }
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank text never counts as content, even with a zero threshold.
fn has_content(text: &str, min_chars: usize) -> bool {
    !text.trim().is_empty() && char_len(text) >= min_chars
}

/// Run CPU-bound scanning off the async runtime.
async fn run_blocking<T, F>(f: F) -> ExtractResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await?)
}
