//! Sliding-window character chunking

use super::{char_offsets, Chunker, ChunkingError, ChunkingOptions};
use crate::types::{Chunk, Document};
use tracing::debug;

/// Cuts the text into windows of `chunk_size` characters advanced by a
/// fixed step
///
/// The step is `chunk_size - overlap_size`. When the overlap is not smaller
/// than the chunk size the step falls back to half the chunk size, and it is
/// never less than one character.
#[derive(Debug, Clone)]
pub struct SlidingWindowChunker {
    options: ChunkingOptions,
}

impl SlidingWindowChunker {
    /// Creates a sliding-window chunker
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfiguration`] if `chunk_size` is 0.
    pub fn new(options: ChunkingOptions) -> Result<Self, ChunkingError> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Number of characters between consecutive window starts
    ///
    /// # Examples
    ///
    /// ```
    /// use chunkwise_core::chunking::{ChunkingOptions, SlidingWindowChunker};
    ///
    /// let options = ChunkingOptions { chunk_size: 10, overlap_size: 3, ..Default::default() };
    /// assert_eq!(SlidingWindowChunker::new(options).unwrap().step(), 7);
    ///
    /// let options = ChunkingOptions { chunk_size: 10, overlap_size: 12, ..Default::default() };
    /// assert_eq!(SlidingWindowChunker::new(options).unwrap().step(), 5);
    /// ```
    pub fn step(&self) -> usize {
        let size = self.options.chunk_size;
        match size.checked_sub(self.options.overlap_size) {
            Some(step) if step > 0 => step,
            _ => (size / 2).max(1),
        }
    }
}

impl Chunker for SlidingWindowChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.is_blank() {
            return Vec::new();
        }

        let text = document.content.as_str();
        let offsets = char_offsets(text);
        let length = offsets.len() - 1;
        let size = self.options.chunk_size;
        let step = self.step();

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + size).min(length);
            chunks.push(Chunk::from_document(
                document,
                chunks.len(),
                &text[offsets[start]..offsets[end]],
            ));

            if end >= length {
                break;
            }
            start += step;
        }

        debug!(
            "Sliding-window chunking of {} produced {} chunks (step {})",
            document.id,
            chunks.len(),
            step
        );

        chunks
    }

    fn name(&self) -> &'static str {
        "sliding_window"
    }
}
