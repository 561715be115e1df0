//! Fixed-size character chunking

use super::{char_offsets, Chunker, ChunkingError, ChunkingOptions};
use crate::types::{Chunk, Document};
use tracing::debug;

/// Cuts the text into windows of `chunk_size` characters
///
/// Each window after the first starts `overlap_size` characters before the
/// end of the previous one. The window that reaches the end of the text is
/// the last one.
///
/// # Examples
///
/// ```
/// use chunkwise_core::chunking::{Chunker, ChunkingOptions, FixedSizeChunker};
/// use chunkwise_core::types::Document;
///
/// let chunker = FixedSizeChunker::new(ChunkingOptions {
///     chunk_size: 4,
///     overlap_size: 1,
///     ..Default::default()
/// })
/// .unwrap();
///
/// let chunks = chunker.chunk(&Document::new("d", "abcdefghij", "x"));
/// let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
/// assert_eq!(texts, vec!["abcd", "defg", "ghij"]);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    options: ChunkingOptions,
}

impl FixedSizeChunker {
    /// Creates a fixed-size chunker
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfiguration`] if `chunk_size` is 0.
    pub fn new(options: ChunkingOptions) -> Result<Self, ChunkingError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Returns the chunking options
    pub fn options(&self) -> &ChunkingOptions {
        &self.options
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.is_blank() {
            return Vec::new();
        }

        let text = document.content.as_str();
        let offsets = char_offsets(text);
        let length = offsets.len() - 1;
        let size = self.options.chunk_size;
        let overlap = self.options.overlap_size;

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < length {
            let end = (start + size).min(length);
            chunks.push(Chunk::from_document(
                document,
                chunks.len(),
                &text[offsets[start]..offsets[end]],
            ));

            if end == length {
                break;
            }

            let next = end.saturating_sub(overlap);
            start = if next <= start { end } else { next };
        }

        debug!(
            "Fixed-size chunking of {} produced {} chunks",
            document.id,
            chunks.len()
        );

        chunks
    }

    fn name(&self) -> &'static str {
        "fixed_size"
    }
}
