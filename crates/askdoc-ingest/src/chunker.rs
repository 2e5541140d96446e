//! Overlapping chunk splitter with sentence-boundary snapping.

use askdoc_core::config::ChunkingSettings;

/// How far back from a proposed endpoint the boundary search looks.
const BOUNDARY_WINDOW: usize = 200;

/// Splits normalized text into bounded, overlapping segments. Overlap
/// exists so a sentence cut at a boundary is still whole in at least one
/// chunk. `start` advances by at least one byte per step, so chunking
/// always terminates.
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
    min_chunk_size: usize,
}

impl Chunker {
    pub fn new(settings: &ChunkingSettings) -> Self {
        Self {
            chunk_size: settings.chunk_size.max(1),
            overlap: settings.overlap.min(settings.chunk_size.saturating_sub(1)),
            min_chunk_size: settings.min_chunk_size,
        }
    }

    /// Chunking only pays off once a document is clearly larger than one
    /// chunk; below this the document is kept whole.
    pub fn should_chunk(&self, text: &str) -> bool {
        text.len() > 2 * self.chunk_size
    }

    /// Raw byte spans covering the whole input. Adjacent spans overlap by
    /// up to `overlap` bytes; the final span always ends at end-of-text.
    pub fn chunk_spans(&self, text: &str) -> Vec<(usize, usize)> {
        let len = text.len();
        if len == 0 {
            return Vec::new();
        }
        if len <= self.chunk_size {
            return vec![(0, len)];
        }

        let mut spans = Vec::new();
        let mut start = 0;
        while start < len {
            let mut end = start + self.chunk_size;
            if end >= len {
                end = len;
            } else {
                while end < len && !text.is_char_boundary(end) {
                    end += 1;
                }
                if end < len {
                    let floor = (start + self.chunk_size).saturating_sub(BOUNDARY_WINDOW).max(start + 1);
                    end = snap_to_break(text, end, floor);
                }
            }
            spans.push((start, end));
            if end >= len {
                break;
            }
            let mut next = end.saturating_sub(self.overlap).max(start + 1);
            while !text.is_char_boundary(next) {
                next += 1;
            }
            start = next;
        }
        spans
    }

    /// Trimmed chunk texts. A document that fits in one chunk is returned
    /// as-is; otherwise segments below the substantive minimum are dropped.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let spans = self.chunk_spans(text);
        if spans.len() == 1 {
            return vec![text.to_string()];
        }
        spans
            .into_iter()
            .map(|(s, e)| text[s..e].trim())
            .filter(|c| c.len() > self.min_chunk_size)
            .map(str::to_string)
            .collect()
    }
}

/// Walk backwards from `end` towards `floor` looking for a
/// sentence-ending punctuation followed by space or newline; failing
/// that, a paragraph break. Returns `end` unchanged when neither exists.
fn snap_to_break(text: &str, end: usize, floor: usize) -> usize {
    let bytes = text.as_bytes();
    let mut i = end;
    while i > floor {
        if matches!(bytes[i - 1], b'.' | b'!' | b'?') && matches!(bytes[i], b' ' | b'\n') {
            return i;
        }
        i -= 1;
    }
    let mut i = end;
    while i > floor {
        if bytes[i - 1] == b'\n' && bytes[i] == b'\n' {
            return i;
        }
        i -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(chunk_size: usize, overlap: usize, min_chunk_size: usize) -> Chunker {
        Chunker::new(&ChunkingSettings { chunk_size, overlap, min_chunk_size })
    }

    #[test]
    fn short_text_is_one_chunk() {
        let c = chunker(100, 20, 10);
        assert_eq!(c.chunk("tiny"), vec!["tiny".to_string()]);
    }

    #[test]
    fn spans_cover_the_whole_input() {
        // no sentence punctuation, so endpoints never snap backwards
        let text = "word ".repeat(200);
        for (chunk_size, overlap) in [(100, 20), (64, 0), (50, 49), (1000, 999)] {
            let c = chunker(chunk_size, overlap, 0);
            let spans = c.chunk_spans(&text);
            assert_eq!(spans[0].0, 0);
            assert_eq!(spans.last().expect("non-empty").1, text.len());
            // removing the overlap from every span after the first must
            // reconstruct the original length exactly
            let mut covered = spans[0].1 - spans[0].0;
            for window in spans.windows(2) {
                let (prev, cur) = (window[0], window[1]);
                assert!(cur.0 <= prev.1, "spans must overlap or touch");
                covered += cur.1 - prev.1;
            }
            assert_eq!(covered, text.len());
        }
    }

    #[test]
    fn termination_bound_holds() {
        let text = "word ".repeat(500);
        let (chunk_size, overlap) = (100, 20);
        let c = chunker(chunk_size, overlap, 0);
        let spans = c.chunk_spans(&text);
        let bound = text.len().div_ceil(chunk_size - overlap) + 1;
        assert!(spans.len() <= bound, "{} spans > bound {}", spans.len(), bound);
    }

    #[test]
    fn endpoint_snaps_to_sentence_boundary() {
        let lead = "x".repeat(80);
        let text = format!("{lead}. The next sentence runs for quite a while after the break point.");
        let c = chunker(100, 10, 0);
        let spans = c.chunk_spans(&text);
        // first span ends just past the '.', before the space
        assert_eq!(spans[0].1, lead.len() + 1);
    }

    #[test]
    fn endpoint_falls_back_to_paragraph_break() {
        let lead = "x".repeat(80);
        let text = format!("{lead}\n\n{}", "y".repeat(80));
        let c = chunker(100, 10, 0);
        let spans = c.chunk_spans(&text);
        assert_eq!(spans[0].1, lead.len() + 1);
    }

    #[test]
    fn small_trailing_fragments_are_dropped() {
        let text = format!("{}. {}", "a".repeat(99), "b".repeat(8));
        let c = chunker(100, 0, 20);
        let chunks = c.chunk(&text);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].starts_with('a'));
    }

    #[test]
    fn multibyte_text_never_splits_a_character() {
        let text = "héllo wörld ".repeat(60);
        let c = chunker(50, 10, 0);
        for (s, e) in c.chunk_spans(&text) {
            assert!(text.is_char_boundary(s) && text.is_char_boundary(e));
        }
    }

    #[test]
    fn should_chunk_requires_double_chunk_size() {
        let c = chunker(100, 20, 10);
        assert!(!c.should_chunk(&"x".repeat(200)));
        assert!(c.should_chunk(&"x".repeat(201)));
    }
}
