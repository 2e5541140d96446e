//! askdoc-answer
//!
//! Turns ranked search results into a single readable answer: the most
//! relevant content blocks from the top results, followed by a source
//! attribution line. Never returns an empty string; every no-match case
//! gets a templated explanation instead.

use std::collections::HashSet;

use askdoc_core::config::AnswerSettings;
use askdoc_core::types::SearchResult;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static BULLET_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•*▪▫◦‣⁃]").expect("static regex"));
static MULTI_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Paragraphs shorter than this carry no substance worth quoting.
const MIN_PARAGRAPH_CHARS: usize = 50;
/// A cleaned block below this length is discarded as noise.
const MIN_BLOCK_CHARS: usize = 30;
/// Sentences this short are skipped during the sentence-level fallback.
const MIN_SENTENCE_CHARS: usize = 20;
/// Only the first few results feed the answer, for coherence.
const MAX_SOURCE_RESULTS: usize = 4;

struct Block {
    text: String,
    source: String,
    relevance: usize,
    similarity: f32,
}

pub struct AnswerComposer {
    settings: AnswerSettings,
}

impl AnswerComposer {
    pub fn new(settings: AnswerSettings) -> Self {
        Self { settings }
    }

    /// Compose a display answer for `query` from ranked `results`.
    pub fn compose_answer(&self, query: &str, results: &[SearchResult]) -> String {
        if results.is_empty() {
            return format!(
                "No relevant information found in the documents for '{query}'. \
                 Try rephrasing or check that relevant documents are loaded."
            );
        }

        let query_words = significant_words(query);
        let mut blocks = Vec::new();
        for result in results.iter().take(MAX_SOURCE_RESULTS) {
            if result.similarity <= self.settings.relevance_floor {
                continue;
            }
            let mut found = harvest_paragraphs(result, &query_words);
            if found.is_empty() {
                found = harvest_sentences(result, &query_words);
            }
            blocks.extend(found);
        }

        if blocks.is_empty() {
            let mut names = Vec::new();
            for r in results {
                if !names.contains(&r.display_name) {
                    names.push(r.display_name.clone());
                }
                if names.len() == 3 {
                    break;
                }
            }
            debug!(query, candidates = names.len(), "results matched but no block survived");
            return format!(
                "I found documents that may be related to '{query}' ({}), but couldn't locate \
                 specific information that directly addresses your question. Try using more \
                 specific keywords or rephrasing your query.",
                names.join(", ")
            );
        }

        blocks.sort_by(|a, b| {
            b.relevance
                .cmp(&a.relevance)
                .then_with(|| b.similarity.partial_cmp(&a.similarity).unwrap_or(std::cmp::Ordering::Equal))
        });

        let mut body = String::new();
        let mut sources: Vec<String> = Vec::new();
        for block in blocks.iter().take(self.settings.max_blocks) {
            if !sources.contains(&block.source) {
                sources.push(block.source.clone());
            }
            let mut text = block.text.trim().to_string();
            if !text.ends_with(['.', '!', '?']) {
                text.push('.');
            }
            body.push_str(&text);
            body.push_str("\n\n");
        }

        let label = if sources.len() > 1 { "Sources" } else { "Source" };
        format!("{body}---\n{label}: {}", sources.join(", "))
    }
}

impl Default for AnswerComposer {
    fn default() -> Self {
        Self::new(AnswerSettings::default())
    }
}

/// Lowercased query words longer than two characters, punctuation trimmed.
fn significant_words(query: &str) -> HashSet<String> {
    query
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| w.len() > 2)
        .collect()
}

fn distinct_matches(text_lower: &str, query_words: &HashSet<String>) -> usize {
    query_words.iter().filter(|w| text_lower.contains(w.as_str())).count()
}

fn clean_block(text: &str) -> String {
    let stripped = BULLET_NOISE.replace_all(text, "");
    MULTI_WS.replace_all(&stripped, " ").trim().to_string()
}

fn harvest_paragraphs(result: &SearchResult, query_words: &HashSet<String>) -> Vec<Block> {
    let mut blocks = Vec::new();
    for paragraph in result.content.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.len() <= MIN_PARAGRAPH_CHARS {
            continue;
        }
        let relevance = distinct_matches(&paragraph.to_lowercase(), query_words);
        if relevance == 0 {
            continue;
        }
        let text = clean_block(paragraph);
        if text.len() > MIN_BLOCK_CHARS {
            blocks.push(Block {
                text,
                source: result.display_name.clone(),
                relevance,
                similarity: result.similarity,
            });
        }
    }
    blocks
}

/// Fallback for content without paragraph structure: group consecutive
/// matching sentences in pairs so a block reads as more than a fragment.
fn harvest_sentences(result: &SearchResult, query_words: &HashSet<String>) -> Vec<Block> {
    let flat = result.content.replace('\n', " ");
    let mut blocks = Vec::new();
    let mut group: Vec<&str> = Vec::new();
    for sentence in flat.split(". ") {
        let sentence = sentence.trim();
        if sentence.len() <= MIN_SENTENCE_CHARS {
            continue;
        }
        if distinct_matches(&sentence.to_lowercase(), query_words) > 0 {
            group.push(sentence);
            if group.len() >= 2 {
                let mut text = clean_block(&group.join(". "));
                if !text.ends_with('.') {
                    text.push('.');
                }
                let relevance = distinct_matches(&text.to_lowercase(), query_words);
                blocks.push(Block {
                    text,
                    source: result.display_name.clone(),
                    relevance,
                    similarity: result.similarity,
                });
                group.clear();
            }
        }
    }
    // a single trailing match still beats returning nothing
    if blocks.is_empty() && group.len() == 1 {
        let mut text = clean_block(group[0]);
        if !text.ends_with('.') {
            text.push('.');
        }
        let relevance = distinct_matches(&text.to_lowercase(), query_words);
        blocks.push(Block {
            text,
            source: result.display_name.clone(),
            relevance,
            similarity: result.similarity,
        });
    }
    blocks
}
