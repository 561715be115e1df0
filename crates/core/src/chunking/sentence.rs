//! Sentence-aware chunking
//!
//! Sentences are packed greedily into chunks of at most `chunk_size`
//! characters. When a chunk is closed, its trailing sentences seed the next
//! chunk so that roughly `overlap_size` characters repeat across the
//! boundary.

use super::{Chunker, ChunkingError, ChunkingOptions};
use crate::semantic::SentenceSplitter;
use crate::types::{Chunk, Document};
use tracing::debug;

/// Packs whole sentences into chunks
///
/// A chunk is closed before adding a sentence that would push it past
/// `chunk_size`, or once it holds `max_sentences_per_chunk` sentences. A
/// single sentence longer than `chunk_size` becomes its own chunk.
///
/// # Examples
///
/// ```
/// use chunkwise_core::chunking::{Chunker, ChunkingOptions, SentenceAwareChunker};
/// use chunkwise_core::types::Document;
///
/// let chunker = SentenceAwareChunker::new(ChunkingOptions {
///     chunk_size: 1000,
///     overlap_size: 0,
///     respect_sentence_boundaries: true,
///     max_sentences_per_chunk: Some(2),
/// })
/// .unwrap();
///
/// let doc = Document::new("d", "One. Two. Three. Four. Five.", "x");
/// let texts: Vec<String> = chunker.chunk(&doc).into_iter().map(|c| c.text).collect();
///
/// assert_eq!(texts, vec!["One. Two.", "Three. Four.", "Five."]);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceAwareChunker {
    options: ChunkingOptions,
    splitter: SentenceSplitter,
}

impl SentenceAwareChunker {
    /// Creates a sentence-aware chunker
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfiguration`] if `chunk_size` is 0 or
    /// `max_sentences_per_chunk` is `Some(0)`.
    pub fn new(options: ChunkingOptions) -> Result<Self, ChunkingError> {
        options.validate()?;
        Ok(Self {
            options,
            splitter: SentenceSplitter::default(),
        })
    }

    /// Trailing sentences of a closed chunk that start the next one
    ///
    /// The last sentence is always kept. Earlier sentences are added while
    /// the seed stays within 120% of `overlap_size`, stopping as soon as it
    /// reaches 80%.
    fn overlap_seed(&self, sentences: &[String]) -> (Vec<String>, usize) {
        let overlap = self.options.overlap_size;
        let mut seed = Vec::new();
        let mut seed_len = 0;

        for sentence in sentences.iter().rev() {
            let size = sentence.chars().count() + 1;

            if !seed.is_empty() && (seed_len + size) * 10 > overlap * 12 {
                break;
            }

            seed.push(sentence.clone());
            seed_len += size;

            if seed_len * 10 >= overlap * 8 {
                break;
            }
        }

        seed.reverse();
        (seed, seed_len)
    }
}

impl Chunker for SentenceAwareChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.is_blank() {
            return Vec::new();
        }

        let sentences = self.splitter.split(&document.content);
        let chunk_size = self.options.chunk_size;
        let max_sentences = self.options.max_sentences_per_chunk;

        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_len = 0;

        for sentence in sentences {
            let sentence_len = sentence.chars().count();
            let exceeds_size = current_len + sentence_len > chunk_size;
            let at_max = max_sentences.is_some_and(|max| current.len() >= max);

            if (exceeds_size || at_max) && !current.is_empty() {
                chunks.push(Chunk::from_document(
                    document,
                    chunks.len(),
                    current.join(" "),
                ));

                if self.options.overlap_size > 0 {
                    let (seed, seed_len) = self.overlap_seed(&current);
                    current = seed;
                    current_len = seed_len;
                } else {
                    current.clear();
                    current_len = 0;
                }
            }

            current_len += sentence_len + 1;
            current.push(sentence);
        }

        if !current.is_empty() {
            chunks.push(Chunk::from_document(
                document,
                chunks.len(),
                current.join(" "),
            ));
        }

        debug!(
            "Sentence-aware chunking of {} produced {} chunks",
            document.id,
            chunks.len()
        );

        chunks
    }

    fn name(&self) -> &'static str {
        "sentence_aware"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_SENTENCES: &str = "Alpha 1. Bravo 2. Charl 3. Delta 4. Echoo 5.";

    fn chunker(
        chunk_size: usize,
        overlap_size: usize,
        max_sentences_per_chunk: Option<usize>,
    ) -> SentenceAwareChunker {
        SentenceAwareChunker::new(ChunkingOptions {
            chunk_size,
            overlap_size,
            respect_sentence_boundaries: true,
            max_sentences_per_chunk,
        })
        .unwrap()
    }

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_blank_document_yields_no_chunks() {
        let chunker = chunker(100, 10, Some(5));
        assert!(chunker.chunk(&Document::new("d", "", "x")).is_empty());
        assert!(chunker.chunk(&Document::new("d", "  \n\n ", "x")).is_empty());
    }

    #[test]
    fn test_packs_sentences_up_to_size() {
        let doc = Document::new("d", "Alpha one. Beta two. Gamma three. Delta four.", "x");
        let chunks = chunker(25, 0, None).chunk(&doc);

        assert_eq!(
            texts(&chunks),
            vec!["Alpha one. Beta two.", "Gamma three. Delta four."]
        );
    }

    #[test]
    fn test_max_sentences_closes_chunk() {
        let doc = Document::new("d", "One. Two. Three. Four. Five.", "x");
        let chunks = chunker(1000, 0, Some(2)).chunk(&doc);

        assert_eq!(texts(&chunks), vec!["One. Two.", "Three. Four.", "Five."]);
    }

    #[test]
    fn test_single_sentence_overlap_seed() {
        let doc = Document::new("d", FIVE_SENTENCES, "x");
        let chunks = chunker(30, 10, None).chunk(&doc);

        assert_eq!(
            texts(&chunks),
            vec!["Alpha 1. Bravo 2. Charl 3.", "Charl 3. Delta 4. Echoo 5."]
        );
    }

    #[test]
    fn test_two_sentence_overlap_seed() {
        let doc = Document::new("d", FIVE_SENTENCES, "x");
        let chunks = chunker(30, 20, None).chunk(&doc);

        assert_eq!(
            texts(&chunks),
            vec![
                "Alpha 1. Bravo 2. Charl 3.",
                "Bravo 2. Charl 3. Delta 4.",
                "Charl 3. Delta 4. Echoo 5.",
            ]
        );
    }

    #[test]
    fn test_overlap_seed_respects_upper_band() {
        let chunker = chunker(30, 12, None);
        let closed: Vec<String> = ["Alpha 1.", "Bravo 2.", "Charl 3."]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (seed, seed_len) = chunker.overlap_seed(&closed);
        assert_eq!(seed, vec!["Charl 3.".to_string()]);
        assert_eq!(seed_len, 9);
    }

    #[test]
    fn test_overlap_seed_always_keeps_last_sentence() {
        let chunker = chunker(30, 2, None);
        let closed = vec!["A much longer closing sentence.".to_string()];

        let (seed, _) = chunker.overlap_seed(&closed);
        assert_eq!(seed, closed);
    }

    #[test]
    fn test_oversized_sentence_becomes_own_chunk() {
        let doc = Document::new("d", "This sentence is long. Hi.", "x");
        let chunks = chunker(10, 0, None).chunk(&doc);

        assert_eq!(texts(&chunks), vec!["This sentence is long.", "Hi."]);
    }

    #[test]
    fn test_trailing_text_without_punctuation() {
        let doc = Document::new("d", "Complete sentence. Trailing fragment", "x");
        let chunks = chunker(1000, 0, None).chunk(&doc);

        assert_eq!(
            texts(&chunks),
            vec!["Complete sentence. Trailing fragment"]
        );
    }

    #[test]
    fn test_indices_contiguous() {
        let content = "A reasonably sized sentence for testing. ".repeat(20);
        let doc = Document::new("doc", content, "x");
        let chunks = chunker(120, 30, Some(5)).chunk(&doc);

        assert!(chunks.len() > 1);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert_eq!(chunk.id, format!("doc_chunk_{}", i));
        }
    }

    #[test]
    fn test_chunking_is_repeatable() {
        let doc = Document::new("d", FIVE_SENTENCES, "x");
        let chunker = chunker(30, 20, None);

        assert_eq!(chunker.chunk(&doc), chunker.chunk(&doc));
    }
}
