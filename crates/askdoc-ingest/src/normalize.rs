//! Text-repair heuristics for extractor output.
//!
//! The spacing repair counters the classic PDF artifacts (glued camelCase
//! words, digits fused to words). It is a replaceable heuristic, not a
//! contract; callers only rely on getting normalized UTF-8 back.

use once_cell::sync::Lazy;
use regex::Regex;

static LOWER_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("static regex"));
static WORD_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Za-z])([0-9])").expect("static regex"));
static DIGIT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9])([A-Za-z])").expect("static regex"));
static MULTI_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Strip control characters (keeping `\n`, `\t`, `\r`), re-insert the
/// spaces PDF extraction tends to drop, and collapse whitespace runs.
pub fn repair_spacing(text: &str) -> String {
    let printable: String = text
        .chars()
        .filter(|&c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect();
    let spaced = LOWER_UPPER.replace_all(&printable, "$1 $2");
    let spaced = WORD_DIGIT.replace_all(&spaced, "$1 $2");
    let spaced = DIGIT_WORD.replace_all(&spaced, "$1 $2");
    MULTI_WS.replace_all(&spaced, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_glued_camel_case() {
        assert_eq!(repair_spacing("resetProcedure"), "reset Procedure");
    }

    #[test]
    fn separates_words_and_digits() {
        assert_eq!(repair_spacing("step1 and 2b"), "step 1 and 2 b");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(repair_spacing("a   b\n\n  c"), "a b c");
    }

    #[test]
    fn drops_control_characters() {
        assert_eq!(repair_spacing("a\u{0}b\u{7}c"), "abc");
    }
}
