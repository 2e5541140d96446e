//! askdoc-search
//!
//! Scores queries against an immutable corpus index. The engine owns one
//! index version; rebuilding after a document change means constructing a
//! fresh engine and swapping the reference, so concurrent readers never
//! observe a half-built index.

mod cache;
mod keyword;

pub use cache::QueryCache;

use std::sync::Mutex;

use askdoc_core::config::SearchSettings;
use askdoc_core::error::{Error, Result};
use askdoc_core::traits::RankingStrategy;
use askdoc_core::types::{DocumentChunk, IndexStats, SearchResult, SearchStats};
use askdoc_index::CorpusIndex;
use tracing::{debug, error, warn};

/// Similarity cutoffs tried strictest-first. A single fixed threshold
/// either misses diffuse matches in small corpora or floods results in
/// large ones; the cascade stops at the first cutoff with enough matches.
const THRESHOLDS: [f32; 4] = [0.02, 0.01, 0.005, 0.001];

pub struct SearchEngine {
    chunks: Vec<DocumentChunk>,
    index: CorpusIndex,
    settings: SearchSettings,
    cache: Mutex<QueryCache>,
    stats: Mutex<SearchStats>,
}

impl SearchEngine {
    /// Builds the index for `chunks`. Construction never fails: a corpus
    /// the vectorizer cannot represent is served by the keyword fallback.
    pub fn new(chunks: Vec<DocumentChunk>, settings: SearchSettings) -> Self {
        let index = CorpusIndex::build(&chunks, settings.method);
        let cache = Mutex::new(QueryCache::new(settings.cache_capacity));
        Self { chunks, index, settings, cache, stats: Mutex::default() }
    }

    /// Up to `top_k` results in descending similarity order. Returns an
    /// empty sequence when nothing is relevant; the only error is a
    /// malformed (empty) query.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::Validation("query must be a non-empty string".into()));
        }
        if self.chunks.is_empty() {
            warn!("search against an empty corpus");
            return Ok(Vec::new());
        }
        let top_k = top_k.clamp(1, self.settings.max_results.min(self.chunks.len()).max(1));

        self.bump(|s| s.total_searches += 1);

        let cache_key = format!("{}:{}:{}", self.index.effective_method().as_str(), query, top_k);
        if let Some(hit) = self.cache_get(&cache_key) {
            self.bump(|s| s.cache_hits += 1);
            debug!(query, "query cache hit");
            return Ok(hit);
        }

        let results = if self.index.is_available() {
            match self.vector_search(query, top_k) {
                Ok(results) => results,
                Err(e) => {
                    error!(error = %e, "vector search failed, retrying with keyword fallback");
                    self.bump(|s| s.failed_searches += 1);
                    keyword::keyword_search(&self.chunks, query, top_k)
                }
            }
        } else {
            keyword::keyword_search(&self.chunks, query, top_k)
        };

        self.cache_put(cache_key, results.clone());
        Ok(results)
    }

    fn vector_search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        let similarities = self
            .index
            .similarities(query)
            .ok_or_else(|| Error::Search("vector index unavailable".into()))?;
        if similarities.len() != self.chunks.len() {
            return Err(Error::Search(format!(
                "similarity dimension mismatch: {} scores for {} chunks",
                similarities.len(),
                self.chunks.len()
            )));
        }

        let mut candidates: Vec<(usize, f32)> = Vec::new();
        for threshold in THRESHOLDS {
            candidates = similarities
                .iter()
                .copied()
                .enumerate()
                .filter(|&(_, s)| s > threshold)
                .collect();
            if candidates.len() >= 2.min(top_k) {
                break;
            }
        }
        if candidates.is_empty() {
            debug!(query, "no vector matches above any threshold, using keyword fallback");
            return Ok(keyword::keyword_search(&self.chunks, query, top_k));
        }

        candidates.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Ok(candidates
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(rank, (index, similarity))| {
                let chunk = &self.chunks[index];
                SearchResult {
                    chunk_id: chunk.id,
                    source_name: chunk.source_name.clone(),
                    display_name: chunk.display_name.clone(),
                    content: chunk.content.clone(),
                    similarity,
                    rank: rank + 1,
                    method: self.index.effective_method(),
                }
            })
            .collect())
    }

    pub fn chunks(&self) -> &[DocumentChunk] {
        &self.chunks
    }

    pub fn index_stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn search_stats(&self) -> SearchStats {
        self.stats.lock().map(|s| *s).unwrap_or_default()
    }

    // A poisoned lock degrades to a cache miss / dropped counter rather
    // than failing the query.
    fn cache_get(&self, key: &str) -> Option<Vec<SearchResult>> {
        self.cache.lock().ok().and_then(|c| c.get(key))
    }

    fn cache_put(&self, key: String, results: Vec<SearchResult>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, results);
        }
    }

    fn bump(&self, f: impl FnOnce(&mut SearchStats)) {
        if let Ok(mut stats) = self.stats.lock() {
            f(&mut stats);
        }
    }
}

impl RankingStrategy for SearchEngine {
    fn score(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        self.search(query, top_k)
    }
}
