//! Domain types shared by the ingestion, indexing and search crates.

use serde::{Deserialize, Serialize};

/// Stable position of a chunk within the corpus (array index). Ranking
/// output is joined back to content through this id.
pub type ChunkId = usize;

/// A chunk of a source document that is independently retrievable.
///
/// - `id`: position within the corpus at build time
/// - `display_name`: human-readable label; carries a part index for
///   multi-chunk files ("report.pdf (Part 2/5)")
/// - `source_name`: original filename, shared by sibling chunks
/// - `content`: normalized UTF-8 text, never empty
/// - `chunk_index`/`total_chunks`: position within the parent document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentChunk {
    pub id: ChunkId,
    pub display_name: String,
    pub source_name: String,
    pub content: String,
    pub chunk_index: usize,
    pub total_chunks: usize,
}

/// Which scoring strategy produced a result. Selected at index build time;
/// `Keyword` is also the fallback when no vector index is available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankMethod {
    Tfidf,
    Count,
    Keyword,
}

impl RankMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tfidf => "tfidf",
            Self::Count => "count",
            Self::Keyword => "keyword",
        }
    }
}

/// One ranked hit. `similarity` is in [0, 1] and higher is always better;
/// `rank` starts at 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk_id: ChunkId,
    pub source_name: String,
    pub display_name: String,
    pub content: String,
    pub similarity: f32,
    pub rank: usize,
    pub method: RankMethod,
}

/// Read-only introspection over a built index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexStats {
    pub corpus_size: usize,
    pub vocabulary_size: usize,
    pub method: RankMethod,
}

/// Per-engine search counters, reset when the index is rebuilt.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub total_searches: u64,
    pub cache_hits: u64,
    pub failed_searches: u64,
}
