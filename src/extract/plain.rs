// src/extract/plain.rs
// Plain-text-only extractor

use super::{TextExtractor, decode_text, is_text_type};
use crate::error::Result;

/// Returned for formats this extractor does not read
pub const UNSUPPORTED_PLACEHOLDER: &str =
    "This file format cannot be read here. Please paste the text of your notes instead.";

/// Reads text/* uploads; every other format yields the placeholder string
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderExtractor;

impl TextExtractor for PlaceholderExtractor {
    fn extract(&self, content: &[u8], content_type: &str) -> Result<String> {
        if is_text_type(content_type) {
            Ok(decode_text(content))
        } else {
            Ok(UNSUPPORTED_PLACEHOLDER.to_string())
        }
    }
}
