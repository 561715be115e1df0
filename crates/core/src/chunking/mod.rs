//! Document chunking strategies
//!
//! A chunker turns a cleaned [`Document`] into an ordered list of [`Chunk`]s
//! with contiguous indices starting at zero. Three strategies are available:
//!
//! - [`FixedSizeChunker`] - fixed character windows with overlap
//! - [`SlidingWindowChunker`] - fixed character windows advanced by a fixed step
//! - [`SentenceAwareChunker`] - whole sentences packed up to a size budget,
//!   with sentence-level overlap between consecutive chunks
//!
//! Chunking is eager and stateless: calling [`Chunker::chunk`] twice on the
//! same document yields the same chunks.
//!
//! # Examples
//!
//! ```
//! use chunkwise_core::chunking::{ChunkingOptions, ChunkingStrategy};
//! use chunkwise_core::types::Document;
//!
//! let options = ChunkingOptions {
//!     chunk_size: 40,
//!     overlap_size: 0,
//!     ..Default::default()
//! };
//! let chunker = ChunkingStrategy::SentenceAware.build(&options).unwrap();
//!
//! let doc = Document::new("doc", "First sentence here. Second sentence here. Third one.", "a.txt");
//! let chunks = chunker.chunk(&doc);
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].id, "doc_chunk_0");
//! ```

mod fixed;
mod sentence;
mod sliding;

pub use fixed::FixedSizeChunker;
pub use sentence::SentenceAwareChunker;
pub use sliding::SlidingWindowChunker;

use crate::types::{Chunk, Document};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default target chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap in characters
pub const DEFAULT_OVERLAP_SIZE: usize = 200;

/// Default cap on sentences per chunk for sentence-aware chunking
pub const DEFAULT_MAX_SENTENCES_PER_CHUNK: usize = 5;

/// Errors that can occur while building a chunker
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChunkingError {
    /// Invalid configuration parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Options shared by all chunking strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingOptions {
    /// Target chunk size in characters
    pub chunk_size: usize,

    /// Characters of overlap between consecutive chunks
    pub overlap_size: usize,

    /// Whether chunk boundaries should fall between sentences
    pub respect_sentence_boundaries: bool,

    /// Upper bound on sentences per chunk (sentence-aware only)
    pub max_sentences_per_chunk: Option<usize>,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
            respect_sentence_boundaries: true,
            max_sentences_per_chunk: Some(DEFAULT_MAX_SENTENCES_PER_CHUNK),
        }
    }
}

impl ChunkingOptions {
    /// Validates the options
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfiguration`] if:
    /// - `chunk_size` is 0
    /// - `max_sentences_per_chunk` is `Some(0)`
    pub fn validate(&self) -> Result<(), ChunkingError> {
        if self.chunk_size == 0 {
            return Err(ChunkingError::InvalidConfiguration(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.max_sentences_per_chunk == Some(0) {
            return Err(ChunkingError::InvalidConfiguration(
                "max_sentences_per_chunk must be greater than 0".to_string(),
            ));
        }

        if self.overlap_size >= self.chunk_size {
            tracing::warn!(
                "overlap_size ({}) is not smaller than chunk_size ({})",
                self.overlap_size,
                self.chunk_size
            );
        }

        Ok(())
    }
}

/// Splits a document into ordered chunks
pub trait Chunker: Send + Sync {
    /// Chunks `document`; blank content yields no chunks
    fn chunk(&self, document: &Document) -> Vec<Chunk>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// The closed set of chunking strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategy {
    /// Fixed-size character windows
    FixedSize,
    /// Sliding character windows with a fixed step
    SlidingWindow,
    /// Sentence-packed chunks
    #[default]
    SentenceAware,
}

impl ChunkingStrategy {
    /// Builds the chunker for this strategy
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfiguration`] if `options` is invalid.
    pub fn build(&self, options: &ChunkingOptions) -> Result<Box<dyn Chunker>, ChunkingError> {
        let chunker: Box<dyn Chunker> = match self {
            Self::FixedSize => Box::new(FixedSizeChunker::new(options.clone())?),
            Self::SlidingWindow => Box::new(SlidingWindowChunker::new(options.clone())?),
            Self::SentenceAware => Box::new(SentenceAwareChunker::new(options.clone())?),
        };
        Ok(chunker)
    }

    /// Picks sentence-aware chunking when sentence boundaries should be
    /// respected, fixed-size chunking otherwise
    pub fn from_options(options: &ChunkingOptions) -> Self {
        if options.respect_sentence_boundaries {
            Self::SentenceAware
        } else {
            Self::FixedSize
        }
    }

    /// Strategy name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FixedSize => "fixed_size",
            Self::SlidingWindow => "sliding_window",
            Self::SentenceAware => "sentence_aware",
        }
    }
}

impl std::fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChunkingStrategy {
    type Err = ChunkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fixed_size" | "fixed" => Ok(Self::FixedSize),
            "sliding_window" | "sliding" => Ok(Self::SlidingWindow),
            "sentence_aware" | "sentence" => Ok(Self::SentenceAware),
            other => Err(ChunkingError::InvalidConfiguration(format!(
                "unknown chunking strategy: {}",
                other
            ))),
        }
    }
}

/// Byte offset of every character in `text`, plus `text.len()`
///
/// Entry `i` is where character `i` starts, so `text[offsets[a]..offsets[b]]`
/// is the slice of characters `a..b`.
pub(crate) fn char_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ChunkingOptions::default();
        assert_eq!(options.chunk_size, 1000);
        assert_eq!(options.overlap_size, 200);
        assert!(options.respect_sentence_boundaries);
        assert_eq!(options.max_sentences_per_chunk, Some(5));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let options = ChunkingOptions {
            chunk_size: 0,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        for strategy in [
            ChunkingStrategy::FixedSize,
            ChunkingStrategy::SlidingWindow,
            ChunkingStrategy::SentenceAware,
        ] {
            assert!(strategy.build(&options).is_err(), "{} accepted 0", strategy);
        }
    }

    #[test]
    fn test_zero_max_sentences_rejected() {
        let options = ChunkingOptions {
            max_sentences_per_chunk: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ChunkingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_strategy_from_options() {
        let mut options = ChunkingOptions::default();
        assert_eq!(
            ChunkingStrategy::from_options(&options),
            ChunkingStrategy::SentenceAware
        );

        options.respect_sentence_boundaries = false;
        assert_eq!(
            ChunkingStrategy::from_options(&options),
            ChunkingStrategy::FixedSize
        );
    }

    #[test]
    fn test_strategy_parse_and_display() {
        assert_eq!(
            "sliding-window".parse::<ChunkingStrategy>().unwrap(),
            ChunkingStrategy::SlidingWindow
        );
        assert_eq!(
            "fixed".parse::<ChunkingStrategy>().unwrap(),
            ChunkingStrategy::FixedSize
        );
        assert!("semantic".parse::<ChunkingStrategy>().is_err());
        assert_eq!(ChunkingStrategy::SentenceAware.to_string(), "sentence_aware");
    }

    #[test]
    fn test_built_chunker_names() {
        let options = ChunkingOptions::default();
        assert_eq!(
            ChunkingStrategy::FixedSize.build(&options).unwrap().name(),
            "fixed_size"
        );
        assert_eq!(
            ChunkingStrategy::SlidingWindow.build(&options).unwrap().name(),
            "sliding_window"
        );
        assert_eq!(
            ChunkingStrategy::SentenceAware.build(&options).unwrap().name(),
            "sentence_aware"
        );
    }

    #[test]
    fn test_char_offsets() {
        let text = "aé世";
        assert_eq!(char_offsets(text), vec![0, 1, 3, 6]);
        assert_eq!(char_offsets(""), vec![0]);
    }
}
