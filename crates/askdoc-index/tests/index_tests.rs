use askdoc_core::types::{DocumentChunk, RankMethod};
use askdoc_index::CorpusIndex;

fn chunk(id: usize, name: &str, content: &str) -> DocumentChunk {
    DocumentChunk {
        id,
        display_name: name.to_string(),
        source_name: name.to_string(),
        content: content.to_string(),
        chunk_index: 0,
        total_chunks: 1,
    }
}

fn sample_corpus() -> Vec<DocumentChunk> {
    vec![
        chunk(0, "reset.txt", "The password reset procedure requires contacting support first."),
        chunk(1, "backup.txt", "Nightly backups are copied to the offsite storage array."),
        chunk(2, "network.txt", "Network outages are escalated to the on-call engineer."),
    ]
}

#[test]
fn build_is_deterministic() {
    let chunks = sample_corpus();
    let a = CorpusIndex::build(&chunks, RankMethod::Tfidf);
    let b = CorpusIndex::build(&chunks, RankMethod::Tfidf);
    assert_eq!(a.vocabulary_size(), b.vocabulary_size());
    let sims_a = a.similarities("password reset").expect("index available");
    let sims_b = b.similarities("password reset").expect("index available");
    assert_eq!(sims_a, sims_b);
}

#[test]
fn relevant_chunk_scores_highest() {
    let index = CorpusIndex::build(&sample_corpus(), RankMethod::Tfidf);
    let sims = index.similarities("password reset").expect("index available");
    assert!(sims[0] > sims[1]);
    assert!(sims[0] > sims[2]);
    assert!(sims[0] > 0.0);
}

#[test]
fn stop_word_corpus_leaves_index_unavailable() {
    let chunks = vec![
        chunk(0, "a.txt", "the and of to with"),
        chunk(1, "b.txt", "would should could must"),
    ];
    let index = CorpusIndex::build(&chunks, RankMethod::Tfidf);
    assert!(!index.is_available());
    assert_eq!(index.effective_method(), RankMethod::Keyword);
    assert!(index.similarities("anything").is_none());
}

#[test]
fn count_method_ranks_by_presence() {
    let index = CorpusIndex::build(&sample_corpus(), RankMethod::Count);
    assert!(index.is_available());
    assert_eq!(index.effective_method(), RankMethod::Count);
    let sims = index.similarities("backups storage").expect("index available");
    assert!(sims[1] > sims[0]);
}

#[test]
fn keyword_method_builds_no_vectors() {
    let index = CorpusIndex::build(&sample_corpus(), RankMethod::Keyword);
    assert!(!index.is_available());
    assert_eq!(index.vocabulary_size(), 0);
}

#[test]
fn empty_corpus_is_unavailable() {
    let index = CorpusIndex::build(&[], RankMethod::Tfidf);
    assert!(!index.is_available());
    assert_eq!(index.stats().corpus_size, 0);
}

#[test]
fn stats_report_effective_method() {
    let chunks = vec![chunk(0, "a.txt", "the and of to")];
    let index = CorpusIndex::build(&chunks, RankMethod::Tfidf);
    let stats = index.stats();
    assert_eq!(stats.method, RankMethod::Keyword);
    assert_eq!(stats.corpus_size, 1);
    assert_eq!(stats.vocabulary_size, 0);
}
