// src/extract/document.rs
// Full extractor: plain text, markdown and PDF

use pulldown_cmark::{Event, Parser, TagEnd};
use tracing::debug;

use super::{TextExtractor, decode_text, is_text_type};
use crate::error::{ClassroomError, Result};

/// Performs real extraction for the formats notes usually arrive in
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, content: &[u8], content_type: &str) -> Result<String> {
        let text = match content_type {
            "application/pdf" => extract_pdf(content)?,
            "text/markdown" | "text/x-markdown" => markdown_to_text(&decode_text(content)),
            t if is_text_type(t) => decode_text(content),
            other => {
                return Err(ClassroomError::Extraction(format!(
                    "unsupported content type: {}",
                    other
                )));
            }
        };
        debug!(content_type = %content_type, chars = text.chars().count(), "Extracted text");
        Ok(clean_text(&text))
    }
}

fn extract_pdf(content: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed files
    let extracted = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(content))
        .map_err(|_| ClassroomError::Extraction("PDF parser crashed on this file".into()))?;
    extracted.map_err(|e| ClassroomError::Extraction(format!("failed to extract PDF text: {}", e)))
}

/// Flatten markdown to readable text, one block per line
fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => out.push('\n'),
            _ => {}
        }
    }
    out
}

/// Trim lines and collapse runs of blank lines
fn clean_text(text: &str) -> String {
    let mut lines = Vec::new();
    let mut blank = false;
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            if !blank && !lines.is_empty() {
                lines.push("");
            }
            blank = true;
        } else {
            lines.push(line);
            blank = false;
        }
    }
    while lines.last() == Some(&"") {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_flattened() {
        let md = "# Photosynthesis\n\nPlants use **light** to make `glucose`.\n\n- chlorophyll\n- stomata\n";
        let text = DocumentExtractor.extract(md.as_bytes(), "text/markdown").unwrap();
        assert!(text.starts_with("Photosynthesis\n"));
        assert!(text.contains("Plants use light to make glucose."));
        assert!(text.contains("chlorophyll"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_plain_text_cleaned() {
        let text = DocumentExtractor
            .extract(b"  line one  \n\n\n\nline two\n\n", "text/plain")
            .unwrap();
        assert_eq!(text, "line one\n\nline two");
    }

    #[test]
    fn test_garbage_pdf_is_extraction_error() {
        let err = DocumentExtractor
            .extract(b"definitely not a pdf", "application/pdf")
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Extraction(_)));
    }

    #[test]
    fn test_unknown_binary_rejected() {
        let err = DocumentExtractor
            .extract(&[0xde, 0xad], "application/octet-stream")
            .unwrap_err();
        assert!(err.to_string().contains("unsupported content type"));
    }
}
