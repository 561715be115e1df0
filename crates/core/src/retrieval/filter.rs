//! Low-value result filtering

use super::types::RetrievalResult;

/// Minimum trimmed length in characters for a useful chunk
pub const MIN_TRIMMED_LENGTH: usize = 20;

/// Minimum number of non-whitespace characters for a useful chunk
pub const MIN_CONTENT_CHARS: usize = 10;

/// Whether a result is too short or too weakly similar to be useful context
///
/// A result is low value when its trimmed text is shorter than 20 characters,
/// its similarity is below `threshold`, or it has fewer than 10
/// non-whitespace characters.
///
/// # Examples
///
/// ```
/// use chunkwise_core::retrieval::{is_low_value, RetrievalResult};
/// use chunkwise_core::types::{Chunk, Document};
///
/// let doc = Document::new("d", "ok", "x");
/// let short = RetrievalResult::new(Chunk::from_document(&doc, 0, "ok"), 0.99);
/// assert!(is_low_value(&short, 0.35));
/// ```
pub fn is_low_value(result: &RetrievalResult, threshold: f32) -> bool {
    let text = result.chunk.text.trim();

    if text.chars().count() < MIN_TRIMMED_LENGTH {
        return true;
    }

    if result.similarity < threshold {
        return true;
    }

    text.chars().filter(|c| !c.is_whitespace()).count() < MIN_CONTENT_CHARS
}

/// Drops low-value results, keeping the order of the rest
pub fn filter_low_value(results: Vec<RetrievalResult>, threshold: f32) -> Vec<RetrievalResult> {
    results
        .into_iter()
        .filter(|result| !is_low_value(result, threshold))
        .collect()
}
