//! Per-format text extractors behind one dispatch surface.

mod docx;
mod pdf;
mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

use std::path::Path;

use askdoc_core::config::ExtractionSettings;
use askdoc_core::error::{Error, Result};
use askdoc_core::traits::TextExtractor;
use tracing::warn;

pub(crate) fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Truncate to at most `max` bytes, backing off to a char boundary.
pub(crate) fn cap_text(mut text: String, max: usize, path: &Path) -> String {
    if text.len() > max {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
        warn!(path = %path.display(), "extracted text truncated to size cap");
    }
    text
}

/// The closed set of extractors for the supported upload types.
pub struct ExtractorSet {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractorSet {
    pub fn new(settings: &ExtractionSettings) -> Self {
        Self {
            extractors: vec![
                Box::new(PdfExtractor::new(settings.clone())),
                Box::new(DocxExtractor::new(settings.clone())),
                Box::new(PlainTextExtractor::new(settings.clone())),
            ],
        }
    }

    pub fn supports(&self, path: &Path) -> bool {
        self.extractors.iter().any(|e| e.can_extract(path))
    }

    pub fn extract(&self, path: &Path) -> Result<String> {
        let extractor = self
            .extractors
            .iter()
            .find(|e| e.can_extract(path))
            .ok_or_else(|| Error::extraction(path.display(), "unsupported file type"))?;
        extractor.extract(path)
    }
}
