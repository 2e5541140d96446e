//! Term-weighting strategies over a fixed corpus.
//!
//! Both vectorizers freeze their vocabulary at fit time; queries are
//! vectorized against that vocabulary only, so corpus rows and query
//! vectors always live in the same space.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::tokenize::index_terms;

/// Sparse vector sorted by ascending term id.
pub type SparseVec = Vec<(usize, f32)>;

/// Dot product of two id-sorted sparse vectors. Rows are L2-normalized at
/// build time, so this is cosine similarity.
pub fn dot(a: &SparseVec, b: &SparseVec) -> f32 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

fn l2_normalize(v: &mut SparseVec) {
    let norm = v.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in v.iter_mut() {
            *w /= norm;
        }
    }
}

struct VocabularyBounds {
    max_features: usize,
    min_df: usize,
    max_df: usize,
}

/// Select the vocabulary for a corpus: document-frequency bounds first,
/// then the most frequent `max_features` terms, ties broken
/// lexicographically so repeated builds agree. Returns `None` when nothing
/// survives (the index stays unavailable).
fn fit_vocabulary(docs_terms: &[Vec<String>], bounds: &VocabularyBounds) -> Option<HashMap<String, usize>> {
    let mut corpus_freq: HashMap<&str, usize> = HashMap::new();
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for terms in docs_terms {
        let mut seen: HashSet<&str> = HashSet::new();
        for term in terms {
            *corpus_freq.entry(term).or_insert(0) += 1;
            if seen.insert(term) {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }
    }

    let mut kept: Vec<(&str, usize)> = corpus_freq
        .into_iter()
        .filter(|(term, _)| {
            let df = doc_freq[term];
            df >= bounds.min_df && df <= bounds.max_df
        })
        .collect();
    if kept.is_empty() {
        return None;
    }

    if kept.len() > bounds.max_features {
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        kept.truncate(bounds.max_features);
    }

    let mut terms: Vec<&str> = kept.into_iter().map(|(t, _)| t).collect();
    terms.sort_unstable();
    Some(terms.into_iter().enumerate().map(|(id, t)| (t.to_string(), id)).collect())
}

fn term_counts(terms: &[String], vocabulary: &HashMap<String, usize>) -> HashMap<usize, usize> {
    let mut counts = HashMap::new();
    for term in terms {
        if let Some(&id) = vocabulary.get(term) {
            *counts.entry(id).or_insert(0) += 1;
        }
    }
    counts
}

/// Weighted-frequency vectorizer: unigram+bigram terms, sublinear term
/// frequency, smoothed inverse document frequency, L2-normalized rows.
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    pub fn fit(corpus: &[&str]) -> Option<(Self, Vec<SparseVec>)> {
        let n = corpus.len();
        if n == 0 {
            return None;
        }
        let docs_terms: Vec<Vec<String>> = corpus.iter().map(|c| index_terms(c, true)).collect();
        // Bounds scale with corpus size so a 5-document corpus and a
        // 500-document corpus both stay well-conditioned.
        let bounds = VocabularyBounds {
            max_features: 8000.min(100 * n),
            min_df: 1.max(n / 100),
            max_df: if n > 40 { (3 * n + 3) / 4 } else { n },
        };
        let vocabulary = fit_vocabulary(&docs_terms, &bounds)?;

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for terms in &docs_terms {
            let mut seen: HashSet<usize> = HashSet::new();
            for term in terms {
                if let Some(&id) = vocabulary.get(term) {
                    if seen.insert(id) {
                        doc_freq[id] += 1;
                    }
                }
            }
        }
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1 + n) as f32 / (1 + df) as f32).ln() + 1.0)
            .collect();

        let vectorizer = Self { vocabulary, idf };
        let rows = docs_terms.iter().map(|terms| vectorizer.weigh(terms)).collect();
        debug!(documents = n, vocabulary = vectorizer.vocabulary.len(), "tfidf matrix built");
        Some((vectorizer, rows))
    }

    pub fn transform(&self, text: &str) -> SparseVec {
        self.weigh(&index_terms(text, true))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn weigh(&self, terms: &[String]) -> SparseVec {
        let mut row: SparseVec = term_counts(terms, &self.vocabulary)
            .into_iter()
            .map(|(id, tf)| (id, (1.0 + (tf as f32).ln()) * self.idf[id]))
            .collect();
        row.sort_unstable_by_key(|&(id, _)| id);
        l2_normalize(&mut row);
        row
    }
}

/// Binary-presence vectorizer: unigram terms, no weighting beyond L2
/// normalization of the presence vector. Faster to build, coarser ranking.
pub struct CountVectorizer {
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    pub fn fit(corpus: &[&str]) -> Option<(Self, Vec<SparseVec>)> {
        let n = corpus.len();
        if n == 0 {
            return None;
        }
        let docs_terms: Vec<Vec<String>> = corpus.iter().map(|c| index_terms(c, false)).collect();
        let bounds = VocabularyBounds { max_features: 3000.min(50 * n), min_df: 1, max_df: n };
        let vocabulary = fit_vocabulary(&docs_terms, &bounds)?;

        let vectorizer = Self { vocabulary };
        let rows = docs_terms.iter().map(|terms| vectorizer.presence(terms)).collect();
        debug!(documents = n, vocabulary = vectorizer.vocabulary.len(), "presence matrix built");
        Some((vectorizer, rows))
    }

    pub fn transform(&self, text: &str) -> SparseVec {
        self.presence(&index_terms(text, false))
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn presence(&self, terms: &[String]) -> SparseVec {
        let mut row: SparseVec = term_counts(terms, &self.vocabulary)
            .into_keys()
            .map(|id| (id, 1.0))
            .collect();
        row.sort_unstable_by_key(|&(id, _)| id);
        l2_normalize(&mut row);
        row
    }
}
