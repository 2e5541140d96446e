//! Folder-to-corpus loading.

use std::path::{Path, PathBuf};

use askdoc_core::config::Settings;
use askdoc_core::error::{Error, Result};
use askdoc_core::traits::DocumentSource;
use askdoc_core::types::DocumentChunk;
use tracing::{info, warn};

use crate::chunker::Chunker;
use crate::extract::ExtractorSet;

/// Walks a folder, extracts every supported file and emits the ordered
/// chunk corpus. One unreadable file is skipped with a warning and never
/// blocks the rest of the load.
pub struct DocumentLoader {
    extractors: ExtractorSet,
    chunker: Chunker,
    min_document_chars: usize,
}

impl DocumentLoader {
    pub fn new(settings: &Settings) -> Self {
        Self {
            extractors: ExtractorSet::new(&settings.extraction),
            chunker: Chunker::new(&settings.chunking),
            min_document_chars: settings.extraction.min_document_chars,
        }
    }

    /// Supported files under `folder`, sorted for a stable corpus order.
    pub fn supported_files(&self, folder: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(folder)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if self.extractors.supports(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
        files
    }

    /// Extract, validate and chunk a single file. Returned chunk ids start
    /// at `next_id` so sequential callers keep the id == corpus-position
    /// invariant.
    pub fn load_file(&self, path: &Path, next_id: usize) -> Result<Vec<DocumentChunk>> {
        let content = self.extractors.extract(path)?;
        let trimmed = content.trim();
        if trimmed.len() < self.min_document_chars || !trimmed.chars().any(char::is_alphabetic) {
            return Err(Error::extraction(path.display(), "no substantive readable content"));
        }

        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let parts = if self.chunker.should_chunk(trimmed) {
            let chunks = self.chunker.chunk(trimmed);
            if chunks.is_empty() { vec![trimmed.to_string()] } else { chunks }
        } else {
            vec![trimmed.to_string()]
        };

        let total_chunks = parts.len();
        Ok(parts
            .into_iter()
            .enumerate()
            .map(|(chunk_index, content)| DocumentChunk {
                id: next_id + chunk_index,
                display_name: if total_chunks > 1 {
                    format!("{} (Part {}/{})", source_name, chunk_index + 1, total_chunks)
                } else {
                    source_name.clone()
                },
                source_name: source_name.clone(),
                content,
                chunk_index,
                total_chunks,
            })
            .collect())
    }

    /// Load the whole folder into an ordered chunk sequence.
    pub fn load_documents(&self, folder: &Path) -> anyhow::Result<Vec<DocumentChunk>> {
        if !folder.exists() {
            warn!(folder = %folder.display(), "document folder does not exist");
            return Ok(Vec::new());
        }
        let files = self.supported_files(folder);
        if files.is_empty() {
            info!(folder = %folder.display(), "no supported files found");
            return Ok(Vec::new());
        }

        let mut chunks: Vec<DocumentChunk> = Vec::new();
        let mut loaded = 0usize;
        let mut skipped = 0usize;
        for path in &files {
            match self.load_file(path, chunks.len()) {
                Ok(file_chunks) => {
                    chunks.extend(file_chunks);
                    loaded += 1;
                }
                Err(e) => {
                    warn!(error = %e, "skipping file");
                    skipped += 1;
                }
            }
        }
        info!(
            files = files.len(),
            loaded,
            skipped,
            chunks = chunks.len(),
            "document loading complete"
        );
        Ok(chunks)
    }
}

impl DocumentSource for DocumentLoader {
    fn load_documents(&self, folder: &Path) -> anyhow::Result<Vec<DocumentChunk>> {
        Self::load_documents(self, folder)
    }
}
