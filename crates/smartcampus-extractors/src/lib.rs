//! smartcampus-extractors - Best-effort text extraction from course documents.
//!
//! Recovers plain text from uploaded PDF, DOCX, PPTX, TXT and Markdown files
//! without a dedicated parsing library:
//!
//! - PDFs are scanned byte-wise for string literals of text-showing operators.
//! - DOCX/PPTX containers are unzipped and their XML parts scanned for text runs.
//! - Plain text is passed through.
//!
//! When a document yields too little text, a placeholder describing the file
//! is returned instead, so the result is never empty.
//!
//! # Features
//!
//! - `vision` (default) - PDF transcription via an OpenAI-compatible vision model,
//!   tried before the byte scan when the document has a public URL
//!
//! # Example
//!
//! ```ignore
//! use smartcampus_extractors::{ExtractionPipeline, SourceBlob};
//!
//! let pipeline = ExtractionPipeline::from_env();
//! let blob = SourceBlob::new(bytes, "lectures/week1.pptx");
//! let content = pipeline.extract(&blob).await;
//! println!("{}", content.text);
//! ```

mod config;
mod error;
mod pipeline;
mod text;
mod types;

pub mod container;
pub mod pdf;
pub mod recognizer;
pub mod xml;

pub use config::ExtractionConfig;
pub use error::{ExtractError, ExtractResult};
pub use pipeline::ExtractionPipeline;
pub use recognizer::TextRecognizer;
pub use text::collapse_whitespace;
pub use types::{
    DocumentKind, ExtractedContent, ExtractionMethod, OfficeFormat, SourceBlob, TextFormat,
};

#[cfg(feature = "vision")]
pub use recognizer::{VisionConfig, VisionTextRecognizer};
