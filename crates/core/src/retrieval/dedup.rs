//! Near-duplicate suppression for retrieval results
//!
//! Results are visited in descending similarity order. A result is dropped
//! when, compared with any result already kept:
//!
//! - its normalized text is identical,
//! - the Jaccard overlap of their word sets exceeds 0.75, or
//! - the Jaccard overlap of their semantic fingerprints exceeds 0.7.
//!
//! A semantic fingerprint is the alphabetically first ten content tokens of
//! a text, ignoring stop words and tokens of two characters or fewer.

use super::types::RetrievalResult;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::trace;

/// Word-set overlap above which two texts are duplicates
pub const WORD_OVERLAP_THRESHOLD: f32 = 0.75;

/// Fingerprint overlap above which two texts are duplicates
pub const FINGERPRINT_OVERLAP_THRESHOLD: f32 = 0.7;

/// Maximum number of tokens in a semantic fingerprint
pub const FINGERPRINT_TOKENS: usize = 10;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // articles and determiners
        "the", "this", "that", "these", "those", "some", "any", "each", "every",
        // conjunctions
        "and", "but", "nor", "yet", "for", "because", "although", "while", "than",
        // prepositions
        "with", "from", "into", "onto", "about", "above", "below", "over", "under",
        "between", "through", "during", "before", "after", "without", "within", "upon",
        // pronouns
        "you", "your", "yours", "him", "his", "her", "hers", "its", "our", "ours",
        "they", "them", "their", "theirs",
        // auxiliaries
        "are", "was", "were", "been", "being", "has", "have", "had", "having", "does",
        "did", "doing", "will", "would", "shall", "should", "can", "could", "may",
        "might", "must",
        // wh-words
        "what", "which", "who", "whom", "whose", "when", "where", "why", "how",
        // other common words
        "not", "all", "also", "just", "only", "very", "more", "most", "such", "then",
        "there", "here", "out",
    ]
    .into_iter()
    .collect()
});

/// Lowercases and collapses whitespace runs to single spaces
///
/// # Examples
///
/// ```
/// use chunkwise_core::retrieval::normalize_text;
///
/// assert_eq!(normalize_text("  Hello \n\t World  "), "hello world");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive set of whitespace-separated words
pub fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// `|a ∩ b| / |a ∪ b|`, or 0 when either set is empty
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f32 / union as f32
}

/// Order-independent signature of a text's salient tokens
///
/// # Examples
///
/// ```
/// use chunkwise_core::retrieval::semantic_fingerprint;
///
/// let fingerprint = semantic_fingerprint("The borrow checker validates references!");
/// assert_eq!(fingerprint, "borrow checker references validates");
/// ```
pub fn semantic_fingerprint(text: &str) -> String {
    let mut tokens: Vec<String> = text
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .map(str::to_lowercase)
        .filter(|token| token.chars().count() > 2 && !STOP_WORDS.contains(token.as_str()))
        .collect();

    tokens.sort();
    tokens.truncate(FINGERPRINT_TOKENS);
    tokens.join(" ")
}

struct Seen {
    normalized: String,
    words: HashSet<String>,
    fingerprint: HashSet<String>,
}

impl Seen {
    fn new(text: &str) -> Self {
        let normalized = normalize_text(text);
        let words = word_set(&normalized);
        let fingerprint = semantic_fingerprint(text)
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Self {
            normalized,
            words,
            fingerprint,
        }
    }

    fn duplicates(&self, other: &Seen) -> bool {
        self.normalized == other.normalized
            || jaccard_similarity(&self.words, &other.words) > WORD_OVERLAP_THRESHOLD
            || jaccard_similarity(&self.fingerprint, &other.fingerprint)
                > FINGERPRINT_OVERLAP_THRESHOLD
    }
}

/// Keeps at most `max_results` mutually distinct results, most similar first
///
/// Applying the function to its own output returns that output unchanged.
pub fn deduplicate(mut results: Vec<RetrievalResult>, max_results: usize) -> Vec<RetrievalResult> {
    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept = Vec::with_capacity(max_results.min(results.len()));
    let mut seen: Vec<Seen> = Vec::new();

    for result in results {
        if kept.len() >= max_results {
            break;
        }

        let candidate = Seen::new(&result.chunk.text);
        if seen.iter().any(|accepted| accepted.duplicates(&candidate)) {
            trace!("Dropping near-duplicate chunk {}", result.chunk.id);
            continue;
        }

        seen.push(candidate);
        kept.push(result);
    }

    kept
}
