use std::path::Path;

use crate::types::{DocumentChunk, SearchResult};

/// Converts one file into normalized plain text.
///
/// Implementations own their normalization heuristics; swapping one out
/// must not affect any other component as long as output stays normalized
/// UTF-8 text.
pub trait TextExtractor: Send + Sync {
    fn can_extract(&self, path: &Path) -> bool;
    fn extract(&self, path: &Path) -> crate::error::Result<String>;
}

/// Produces the chunk corpus for an index build.
pub trait DocumentSource: Send + Sync {
    fn load_documents(&self, folder: &Path) -> anyhow::Result<Vec<DocumentChunk>>;
}

/// Scores a query against a built corpus. One closed set of strategy
/// variants sits behind this seam; fallback between them is the
/// implementation's business, never the caller's.
pub trait RankingStrategy: Send + Sync {
    fn score(&self, query: &str, top_k: usize) -> crate::error::Result<Vec<SearchResult>>;
}
