use askdoc_core::config::SearchSettings;
use askdoc_core::types::{DocumentChunk, RankMethod};
use askdoc_search::SearchEngine;

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

fn support_corpus() -> Vec<DocumentChunk> {
    vec![
        chunk(0, "reset.txt", "The password reset procedure requires step 1: contact support. Step 2: verify identity."),
        chunk(1, "backup.txt", "Nightly backups are copied to the offsite storage array and verified weekly."),
        chunk(2, "network.txt", "Network outages are escalated to the on-call engineer within fifteen minutes."),
    ]
}

fn engine(chunks: Vec<DocumentChunk>) -> SearchEngine {
    SearchEngine::new(chunks, SearchSettings::default())
}

#[test]
fn end_to_end_password_reset_scenario() {
    let corpus = vec![chunk(
        0,
        "a.txt",
        "The password reset procedure requires step 1: contact support. Step 2: verify identity.",
    )];
    let engine = engine(corpus);
    let results = engine.search("password reset", 3).expect("search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source_name, "a.txt");
    assert!(results[0].similarity > 0.0);
}

#[test]
fn scores_are_monotonically_decreasing() {
    let engine = engine(support_corpus());
    let results = engine.search("password support backup network", 5).expect("search");
    for pair in results.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    for (i, r) in results.iter().enumerate() {
        assert_eq!(r.rank, i + 1);
    }
}

#[test]
fn nonsense_query_returns_empty_not_error() {
    let engine = engine(support_corpus());
    let results = engine.search("zzz_nonexistent_token_xyz", 3).expect("search");
    assert!(results.is_empty());
}

#[test]
fn empty_query_is_a_validation_error() {
    let engine = engine(support_corpus());
    assert!(engine.search("   ", 3).is_err());
    assert!(engine.search("", 3).is_err());
}

#[test]
fn empty_corpus_returns_empty() {
    let engine = engine(Vec::new());
    let results = engine.search("anything", 3).expect("search");
    assert!(results.is_empty());
}

#[test]
fn stop_word_corpus_degrades_to_keyword_path() {
    let chunks = vec![
        chunk(0, "a.txt", "the and of to with would"),
        chunk(1, "b.txt", "should could must might shall"),
    ];
    let engine = engine(chunks);
    // never raises; the keyword path serves (or returns nothing)
    let results = engine.search("would shall", 3).expect("search");
    for r in &results {
        assert_eq!(r.method, RankMethod::Keyword);
    }
}

#[test]
fn repeated_queries_are_deterministic_and_cached() {
    let engine = engine(support_corpus());
    let first = engine.search("password reset", 3).expect("search");
    let second = engine.search("password reset", 3).expect("search");
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.chunk_id, b.chunk_id);
        assert_eq!(a.similarity, b.similarity);
    }
    let stats = engine.search_stats();
    assert_eq!(stats.total_searches, 2);
    assert_eq!(stats.cache_hits, 1);
}

#[test]
fn two_engines_over_the_same_corpus_agree() {
    let a = engine(support_corpus());
    let b = engine(support_corpus());
    let ra = a.search("backup storage", 3).expect("search");
    let rb = b.search("backup storage", 3).expect("search");
    assert_eq!(ra.len(), rb.len());
    for (x, y) in ra.iter().zip(rb.iter()) {
        assert_eq!(x.chunk_id, y.chunk_id);
        assert_eq!(x.similarity, y.similarity);
    }
}

#[test]
fn top_k_is_clamped_to_configured_maximum() {
    let mut chunks = Vec::new();
    for i in 0..20 {
        chunks.push(chunk(i, &format!("doc{i}.txt"), &format!("turbine maintenance record number {i} for the fleet")));
    }
    let engine = engine(chunks);
    let results = engine.search("turbine maintenance", 50).expect("search");
    assert!(results.len() <= SearchSettings::default().max_results);
}

#[test]
fn top_k_zero_still_returns_something_relevant() {
    let engine = engine(support_corpus());
    let results = engine.search("password reset", 0).expect("search");
    assert_eq!(results.len(), 1);
}

#[test]
fn count_method_serves_results() {
    let engine = SearchEngine::new(
        support_corpus(),
        SearchSettings { method: RankMethod::Count, ..SearchSettings::default() },
    );
    let results = engine.search("password reset", 3).expect("search");
    assert!(!results.is_empty());
    assert_eq!(results[0].method, RankMethod::Count);
    assert_eq!(results[0].source_name, "reset.txt");
}

#[test]
fn keyword_method_never_builds_vectors() {
    let engine = SearchEngine::new(
        support_corpus(),
        SearchSettings { method: RankMethod::Keyword, ..SearchSettings::default() },
    );
    assert_eq!(engine.index_stats().vocabulary_size, 0);
    let results = engine.search("password reset", 3).expect("search");
    assert!(!results.is_empty());
    assert_eq!(results[0].method, RankMethod::Keyword);
    assert_eq!(results[0].source_name, "reset.txt");
}
