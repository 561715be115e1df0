//! Sentence splitting for sentence-aware chunking
//!
//! Sentences end at a run of terminal punctuation (`.`, `!`, `?`) followed by
//! whitespace. The punctuation stays attached to the sentence it closes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Terminal punctuation followed by whitespace
static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("Failed to compile sentence boundary regex"));

/// Sentence splitter used by [`SentenceAwareChunker`](crate::chunking::SentenceAwareChunker)
///
/// # Examples
///
/// ```
/// use chunkwise_core::semantic::splitter::SentenceSplitter;
///
/// let splitter = SentenceSplitter::default();
/// let sentences = splitter.split("This is a sentence. This is another sentence.");
///
/// assert_eq!(sentences.len(), 2);
/// assert_eq!(sentences[0], "This is a sentence.");
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    /// Minimum length (in characters) for a sentence to be kept
    min_sentence_length: usize,
}

impl SentenceSplitter {
    /// Creates a new sentence splitter with the specified minimum sentence length
    ///
    /// A minimum of `0` or `1` keeps every non-blank fragment.
    pub fn new(min_sentence_length: usize) -> Self {
        Self {
            min_sentence_length,
        }
    }

    /// Returns the minimum sentence length
    pub fn min_sentence_length(&self) -> usize {
        self.min_sentence_length
    }

    /// Splits text into trimmed, non-blank sentences
    ///
    /// Text after the last boundary becomes the final sentence even without
    /// terminal punctuation.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_BOUNDARY.find_iter(text) {
            let punctuation_len = boundary.as_str().trim_end().len();
            let end = boundary.start() + punctuation_len;
            self.push_sentence(&text[start..end], &mut sentences);
            start = boundary.end();
        }

        if start < text.len() {
            self.push_sentence(&text[start..], &mut sentences);
        }

        sentences
    }

    fn push_sentence(&self, fragment: &str, sentences: &mut Vec<String>) {
        let sentence = fragment.trim();
        if sentence.is_empty() || sentence.chars().count() < self.min_sentence_length {
            return;
        }
        sentences.push(sentence.to_string());
    }
}

impl Default for SentenceSplitter {
    /// Keeps every non-blank sentence
    fn default() -> Self {
        Self::new(1)
    }
}
