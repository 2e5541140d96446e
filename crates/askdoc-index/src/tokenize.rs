//! Tokenization shared by every ranking strategy.

use crate::stopwords::is_stop_word;

/// Lowercased ASCII-alphabetic runs of at least `min_len` characters.
/// Numbers and symbols never enter a vocabulary; they stay in the stored
/// chunk content for display only.
pub fn tokenize(text: &str, min_len: usize) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            if current.len() >= min_len {
                tokens.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
    }
    if current.len() >= min_len {
        tokens.push(current);
    }
    tokens
}

/// Vocabulary terms of one document: stop-filtered unigrams, optionally
/// followed by the bigrams of the surviving sequence. Bigrams are formed
/// after stop-word removal so "reset of password" and "reset password"
/// produce the same pair.
pub fn index_terms(text: &str, with_bigrams: bool) -> Vec<String> {
    let unigrams: Vec<String> = tokenize(text, 2)
        .into_iter()
        .filter(|t| !is_stop_word(t))
        .collect();
    let mut terms = unigrams.clone();
    if with_bigrams {
        for pair in unigrams.windows(2) {
            terms.push(format!("{} {}", pair[0], pair[1]));
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphabetic() {
        assert_eq!(tokenize("Reset-password: step 2", 2), vec!["reset", "password", "step"]);
    }

    #[test]
    fn min_len_filters_short_runs() {
        assert_eq!(tokenize("a an and", 3), vec!["and"]);
    }

    #[test]
    fn numbers_never_tokenize() {
        assert!(tokenize("1234 5678", 2).is_empty());
    }

    #[test]
    fn bigrams_follow_stop_word_removal() {
        let terms = index_terms("the password of the reset", true);
        assert!(terms.contains(&"password reset".to_string()));
    }
}
