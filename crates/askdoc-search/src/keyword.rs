//! Literal-token fallback scoring.

use askdoc_core::types::{DocumentChunk, RankMethod, SearchResult};
use askdoc_index::tokenize::tokenize;

struct Candidate {
    index: usize,
    total: f32,
    exact: usize,
    distinct: usize,
}

/// Composite keyword score per chunk:
/// `3*exact + 2*distinct + position_bonus + length_normalized`, where the
/// position bonus rewards tokens appearing early and the normalized term
/// discounts matches diluted across very long chunks. The result is mapped
/// onto the [0, 1] similarity scale against the theoretical maximum for
/// the token count.
pub fn keyword_search(chunks: &[DocumentChunk], query: &str, top_k: usize) -> Vec<SearchResult> {
    let tokens = tokenize(query, 3);
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for (index, chunk) in chunks.iter().enumerate() {
        let content = chunk.content.to_lowercase();
        if content.is_empty() {
            continue;
        }
        let mut exact = 0usize;
        let mut distinct = 0usize;
        let mut position_bonus = 0.0f32;
        for token in &tokens {
            let occurrences = content.matches(token.as_str()).count();
            exact += occurrences;
            if occurrences > 0 {
                distinct += 1;
            }
            if let Some(pos) = content.find(token.as_str()) {
                position_bonus += 1000usize.saturating_sub(pos) as f32 / 1000.0;
            }
        }
        let length_normalized = exact as f32 / (content.len() as f32 / 1000.0).max(1.0);
        let total = (exact * 3 + distinct * 2) as f32 + position_bonus + length_normalized;
        if total > 0.0 {
            candidates.push(Candidate { index, total, exact, distinct });
        }
    }

    candidates.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.exact.cmp(&a.exact))
            .then_with(|| b.distinct.cmp(&a.distinct))
            .then_with(|| a.index.cmp(&b.index))
    });

    let max_possible = (tokens.len() * 6 + 1) as f32;
    candidates
        .into_iter()
        .take(top_k)
        .enumerate()
        .map(|(rank, c)| {
            let chunk = &chunks[c.index];
            SearchResult {
                chunk_id: chunk.id,
                source_name: chunk.source_name.clone(),
                display_name: chunk.display_name.clone(),
                content: chunk.content.clone(),
                similarity: (c.total / max_possible).min(1.0),
                rank: rank + 1,
                method: RankMethod::Keyword,
            }
        })
        .collect()
}
