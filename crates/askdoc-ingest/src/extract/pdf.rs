use std::fs;
use std::path::Path;

use askdoc_core::config::ExtractionSettings;
use askdoc_core::error::{Error, Result};
use askdoc_core::traits::TextExtractor;
use tracing::{debug, warn};

use crate::normalize::repair_spacing;

use super::has_extension;

/// A page whose cleaned text is shorter than this is dropped as noise.
const MIN_PAGE_CHARS: usize = 10;

/// PDF extractor. Pages come back from pdf-extract separated by form
/// feeds; each page is spacing-repaired and prefixed with a page marker so
/// downstream chunks keep a human-readable anchor.
pub struct PdfExtractor {
    settings: ExtractionSettings,
}

impl PdfExtractor {
    pub fn new(settings: ExtractionSettings) -> Self {
        Self { settings }
    }
}

impl TextExtractor for PdfExtractor {
    fn can_extract(&self, path: &Path) -> bool {
        has_extension(path, "pdf")
    }

    fn extract(&self, path: &Path) -> Result<String> {
        debug!(path = %path.display(), "extracting pdf");
        let bytes = fs::read(path).map_err(|e| Error::extraction(path.display(), e.to_string()))?;
        let raw = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| Error::extraction(path.display(), format!("invalid or corrupted pdf: {e}")))?;

        let mut pages = Vec::new();
        let mut total_len = 0usize;
        for (page_num, page) in raw.split('\u{0C}').enumerate() {
            if page_num >= self.settings.max_pages {
                warn!(path = %path.display(), max_pages = self.settings.max_pages, "page cap reached");
                break;
            }
            let cleaned = repair_spacing(page);
            if cleaned.len() < MIN_PAGE_CHARS {
                continue;
            }
            total_len += cleaned.len();
            pages.push(format!("--- Page {} ---\n{}", page_num + 1, cleaned));
            if total_len > self.settings.max_text_bytes {
                warn!(path = %path.display(), page = page_num + 1, "size cap reached, stopping extraction");
                break;
            }
        }

        let text = pages.join("\n");
        if text.trim().is_empty() {
            return Err(Error::extraction(path.display(), "no readable text found in pdf"));
        }
        Ok(text)
    }
}
