//! Semantic primitives shared by chunking and retrieval
//!
//! # Components
//!
//! - [`similarity`] - Vector normalization and cosine similarity
//! - [`splitter`] - Sentence splitting for sentence-aware chunking
//!
//! # Examples
//!
//! ```
//! use chunkwise_core::semantic::{cosine_similarity, normalize, SentenceSplitter};
//!
//! let splitter = SentenceSplitter::default();
//! let sentences = splitter.split("First sentence. Second sentence. Third sentence.");
//! assert_eq!(sentences.len(), 3);
//!
//! let a = normalize(&[1.0, 1.0]);
//! let similarity = cosine_similarity(&a, &a).unwrap();
//! assert!((similarity - 1.0).abs() < 1e-6);
//! ```

pub mod similarity;
pub mod splitter;

pub use similarity::{cosine_similarity, dot_product, magnitude, normalize, SimilarityError};
pub use splitter::SentenceSplitter;
