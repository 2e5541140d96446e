use std::fs;
use std::path::Path;

use askdoc_core::config::ExtractionSettings;
use askdoc_core::error::{Error, Result};
use askdoc_core::traits::TextExtractor;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, WINDOWS_1252};
use tracing::debug;

use super::{cap_text, has_extension};

/// Decode order after strict UTF-8. WINDOWS_1252 is a superset of latin-1
/// for everything the control-character strip leaves behind, so it covers
/// both legacy legs.
const FALLBACK_ENCODINGS: [&Encoding; 3] = [UTF_16LE, UTF_16BE, WINDOWS_1252];

/// Plain-text extractor with an encoding cascade: the first encoding that
/// decodes without error and yields non-blank content wins.
pub struct PlainTextExtractor {
    settings: ExtractionSettings,
}

impl PlainTextExtractor {
    pub fn new(settings: ExtractionSettings) -> Self {
        Self { settings }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn can_extract(&self, path: &Path) -> bool {
        has_extension(path, "txt")
    }

    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| Error::extraction(path.display(), e.to_string()))?;
        let content = decode_text(&bytes).ok_or_else(|| {
            Error::extraction(path.display(), "could not decode text file with any supported encoding")
        })?;
        debug!(path = %path.display(), chars = content.len(), "decoded text file");
        Ok(cap_text(content, self.settings.max_text_bytes, path))
    }
}

fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Ok(content) = std::str::from_utf8(bytes) {
        // NUL bytes mean this is almost certainly BOM-less UTF-16 that
        // happens to be valid UTF-8; let the cascade handle it.
        if !content.contains('\u{0}') {
            if !content.trim().is_empty() {
                return Some(content.to_string());
            }
            return None;
        }
    }
    for encoding in FALLBACK_ENCODINGS {
        let (content, _, had_errors) = encoding.decode(bytes);
        if !had_errors && !content.trim().is_empty() {
            return Some(content.into_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_decodes_directly() {
        assert_eq!(decode_text("plain text".as_bytes()).as_deref(), Some("plain text"));
    }

    #[test]
    fn utf16le_decodes_via_cascade() {
        let bytes: Vec<u8> = "wind turbine".encode_utf16().flat_map(u16::to_le_bytes).collect();
        assert_eq!(decode_text(&bytes).as_deref(), Some("wind turbine"));
    }

    #[test]
    fn windows_1252_decodes_last() {
        // 0xE9 is 'é' in windows-1252 and invalid standalone UTF-8; the odd
        // length keeps both UTF-16 legs from matching first.
        let bytes = [b'c', b'a', b'f', 0xE9, b'!'];
        assert_eq!(decode_text(&bytes).as_deref(), Some("café!"));
    }

    #[test]
    fn blank_content_is_rejected() {
        assert!(decode_text(b"   \n\t ").is_none());
        assert!(decode_text(b"").is_none());
    }
}
