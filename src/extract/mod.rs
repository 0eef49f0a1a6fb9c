// src/extract/mod.rs
// Text extraction for uploaded notes

mod document;
mod plain;

pub use document::DocumentExtractor;
pub use plain::{PlaceholderExtractor, UNSUPPORTED_PLACEHOLDER};

use std::path::Path;
use tracing::warn;

use crate::config::ExtractorKind;
use crate::error::{ClassroomError, Result};

/// Turns uploaded bytes of a declared content type into plain text.
///
/// Either real extraction or the "paste text instead" placeholder is a
/// valid outcome for formats an implementation cannot read.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, content: &[u8], content_type: &str) -> Result<String>;
}

/// Build the extractor the deployment asked for
pub fn extractor_for(kind: ExtractorKind) -> Box<dyn TextExtractor> {
    match kind {
        ExtractorKind::Full => Box::new(DocumentExtractor),
        ExtractorKind::Placeholder => Box::new(PlaceholderExtractor),
    }
}

/// Guess a content type from a file name
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Notes ready for the Initializer, plus the extraction error if any
#[derive(Debug)]
pub struct ExtractedNotes {
    pub text: String,
    pub error: Option<ClassroomError>,
}

/// Run an extractor without failing: errors are surfaced on `error` and the
/// text degrades to empty, which the Initializer treats as insufficient.
pub fn extract_notes(
    extractor: &dyn TextExtractor,
    content: &[u8],
    content_type: &str,
) -> ExtractedNotes {
    match extractor.extract(content, content_type) {
        Ok(text) => ExtractedNotes { text, error: None },
        Err(e) => {
            warn!(error = %e, content_type = %content_type, "Text extraction failed");
            ExtractedNotes {
                text: String::new(),
                error: Some(e),
            }
        }
    }
}

/// Decode bytes as UTF-8, replacing invalid sequences and dropping a BOM
pub(crate) fn decode_text(content: &[u8]) -> String {
    let text = String::from_utf8_lossy(content);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

pub(crate) fn is_text_type(content_type: &str) -> bool {
    content_type.starts_with("text/")
}
