//! Text-run extraction from OOXML parts.
//!
//! Word documents keep visible text in `<w:t>` elements and presentations in
//! `<a:t>` elements. Rather than parsing the XML, the parts are scanned with a
//! regular expression for those elements. The scan is not namespace-aware and
//! self-closing runs (`<w:t/>`) produce nothing.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::container::Container;
use crate::text::join_fragments;
use crate::types::OfficeFormat;

/// `<a:t>` / `<w:t>` with or without attributes on the opening tag.
static TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[aw]:t(?:\s[^>]*)?>([^<]*)</[aw]:t>").unwrap());

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

static SLIDE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ppt/slides/slide[0-9]+\.xml$").unwrap());

const DOCUMENT_BODY_PART: &str = "word/document.xml";

/// Which parts of a container carry the text to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlRole {
    /// The single `word/document.xml` body of a DOCX.
    DocumentBody,
    /// Every `ppt/slides/slide<N>.xml` of a PPTX.
    Slide,
}

impl XmlRole {
    /// Check if a container path belongs to this role.
    pub fn selects(&self, path: &str) -> bool {
        match self {
            XmlRole::DocumentBody => path == DOCUMENT_BODY_PART,
            XmlRole::Slide => SLIDE_PART.is_match(path),
        }
    }
}

impl From<OfficeFormat> for XmlRole {
    fn from(format: OfficeFormat) -> Self {
        match format {
            OfficeFormat::Docx => XmlRole::DocumentBody,
            OfficeFormat::Pptx => XmlRole::Slide,
        }
    }
}

/// Collect the trimmed, non-empty text runs of one XML part in document order.
///
/// Bytes are decoded lossily; malformed UTF-8 never fails.
pub fn text_runs(xml: &[u8]) -> Vec<String> {
    let xml = String::from_utf8_lossy(xml);

    TEXT_RUN
        .captures_iter(&xml)
        .filter_map(|caps| {
            let whole = caps.get(0)?.as_str();
            let stripped = ANY_TAG.replace_all(whole, "");
            let text = decode_entities(stripped.trim());
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        })
        .collect()
}

/// Extract normalized text from a single XML part.
pub fn extract_text(xml: &[u8]) -> String {
    join_fragments(&text_runs(xml))
}

/// Extract normalized text from every part of `container` selected by `role`.
///
/// Parts are visited in container enumeration order, so slides appear in the
/// order the archive lists them rather than by slide number.
pub fn extract_container(container: &Container, role: XmlRole) -> String {
    let mut fragments: Vec<String> = Vec::new();
    let mut parts = 0usize;

    for entry in container.entries().iter().filter(|e| role.selects(&e.path)) {
        parts += 1;
        fragments.extend(text_runs(&entry.bytes));
    }

    debug!(?role, parts, fragments = fragments.len(), "Scanned XML parts");

    join_fragments(&fragments)
}

/// Decode the predefined XML entities.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{tests::build_zip, unpack};

    #[test]
    fn test_extract_word_runs() {
        let xml = br#"<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world </w:t></w:r></w:p><w:p><w:r><w:t>!</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(extract_text(xml), "Hello world !");
    }

    #[test]
    fn test_extract_drawing_runs() {
        let xml = br#"<p:sld><a:p><a:r><a:rPr lang="en-US"/><a:t>Photosynthesis</a:t></a:r></a:p></p:sld>"#;
        assert_eq!(extract_text(xml), "Photosynthesis");
    }

    #[test]
    fn test_ignores_similar_tags() {
        let xml = br#"<w:p><w:tab/><w:tbl></w:tbl><w:t/><w:t>kept</w:t></w:p>"#;
        assert_eq!(text_runs(xml), vec!["kept".to_string()]);
    }

    #[test]
    fn test_discards_empty_runs() {
        let xml = b"<w:t>   </w:t><w:t></w:t><w:t>x</w:t>";
        assert_eq!(text_runs(xml), vec!["x".to_string()]);
    }

    #[test]
    fn test_no_runs_is_empty_string() {
        assert_eq!(extract_text(b"<w:document/>"), "");
    }

    #[test]
    fn test_decodes_entities() {
        let xml = b"<w:t>A &lt; B &amp;&amp; C</w:t>";
        assert_eq!(extract_text(xml), "A < B && C");
    }

    #[test]
    fn test_invalid_utf8_does_not_fail() {
        let mut xml = b"<w:t>caf".to_vec();
        xml.push(0xFF);
        xml.extend_from_slice(b"</w:t><w:t>ok</w:t>");
        let text = extract_text(&xml);
        assert!(text.starts_with("caf"));
        assert!(text.ends_with("ok"));
    }

    #[test]
    fn test_role_selection() {
        assert!(XmlRole::DocumentBody.selects("word/document.xml"));
        assert!(!XmlRole::DocumentBody.selects("word/footer1.xml"));
        assert!(XmlRole::Slide.selects("ppt/slides/slide12.xml"));
        assert!(!XmlRole::Slide.selects("ppt/slides/_rels/slide1.xml.rels"));
        assert!(!XmlRole::Slide.selects("ppt/slideLayouts/slideLayout1.xml"));
        assert!(!XmlRole::Slide.selects("ppt/slides/slide.xml"));
    }

    #[test]
    fn test_extract_container_follows_enumeration_order() {
        let bytes = build_zip(&[
            ("ppt/slides/slide2.xml", b"<a:t>Second</a:t>"),
            ("ppt/slideLayouts/slideLayout1.xml", b"<a:t>Layout</a:t>"),
            ("ppt/slides/slide1.xml", b"<a:t>First</a:t>"),
        ]);
        let container = unpack(&bytes).unwrap();

        assert_eq!(extract_container(&container, XmlRole::Slide), "Second First");
    }

    #[test]
    fn test_extract_container_docx_body_only() {
        let bytes = build_zip(&[
            ("word/header1.xml", b"<w:t>Header</w:t>"),
            ("word/document.xml", b"<w:t>Body</w:t>"),
        ]);
        let container = unpack(&bytes).unwrap();

        assert_eq!(
            extract_container(&container, XmlRole::from(OfficeFormat::Docx)),
            "Body"
        );
    }
}
