pub mod stopwords;
pub mod tokenize;
pub mod vectorizer;

use askdoc_core::types::{DocumentChunk, IndexStats, RankMethod};
use tracing::{info, warn};

use vectorizer::{dot, CountVectorizer, SparseVec, TfidfVectorizer};

enum VectorIndex {
    Tfidf { vectorizer: TfidfVectorizer, rows: Vec<SparseVec> },
    Count { vectorizer: CountVectorizer, rows: Vec<SparseVec> },
}

/// Immutable vector-space representation of one document set.
///
/// Built once per corpus version and replaced wholesale on any document
/// change; a degenerate vocabulary (stop-words-only corpus) leaves the
/// index unavailable instead of failing, which routes every query through
/// the keyword fallback.
pub struct CorpusIndex {
    method: RankMethod,
    corpus_size: usize,
    index: Option<VectorIndex>,
}

impl CorpusIndex {
    pub fn build(chunks: &[DocumentChunk], method: RankMethod) -> Self {
        let corpus: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let index = match method {
            RankMethod::Keyword => None,
            RankMethod::Tfidf => TfidfVectorizer::fit(&corpus)
                .map(|(vectorizer, rows)| VectorIndex::Tfidf { vectorizer, rows }),
            RankMethod::Count => CountVectorizer::fit(&corpus)
                .map(|(vectorizer, rows)| VectorIndex::Count { vectorizer, rows }),
        };
        let built = Self { method, corpus_size: chunks.len(), index };
        match (&built.index, method) {
            (None, RankMethod::Keyword) => info!(corpus_size = built.corpus_size, "keyword-only index"),
            (None, _) => warn!(
                corpus_size = built.corpus_size,
                "vector index unavailable (empty vocabulary), queries will use keyword fallback"
            ),
            (Some(_), _) => info!(
                corpus_size = built.corpus_size,
                vocabulary_size = built.vocabulary_size(),
                method = method.as_str(),
                "corpus index built"
            ),
        }
        built
    }

    pub fn is_available(&self) -> bool {
        self.index.is_some()
    }

    /// The method that will actually serve queries.
    pub fn effective_method(&self) -> RankMethod {
        if self.index.is_some() { self.method } else { RankMethod::Keyword }
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    pub fn vocabulary_size(&self) -> usize {
        match &self.index {
            Some(VectorIndex::Tfidf { vectorizer, .. }) => vectorizer.vocabulary_size(),
            Some(VectorIndex::Count { vectorizer, .. }) => vectorizer.vocabulary_size(),
            None => 0,
        }
    }

    /// Cosine similarity of the query against every chunk row, in corpus
    /// order. `None` when no vector index is available.
    pub fn similarities(&self, query: &str) -> Option<Vec<f32>> {
        let (query_vec, rows) = match self.index.as_ref()? {
            VectorIndex::Tfidf { vectorizer, rows } => (vectorizer.transform(query), rows),
            VectorIndex::Count { vectorizer, rows } => (vectorizer.transform(query), rows),
        };
        Some(rows.iter().map(|row| dot(&query_vec, row)).collect())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            corpus_size: self.corpus_size,
            vocabulary_size: self.vocabulary_size(),
            method: self.effective_method(),
        }
    }
}
