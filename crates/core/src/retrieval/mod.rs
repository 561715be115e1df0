//! Query-time retrieval
//!
//! # Components
//!
//! - [`classifier`] - Query type detection and dynamic result sizing
//! - [`filter`] - Low-value result filtering
//! - [`dedup`] - Near-duplicate suppression
//! - [`provider`] - Embedding provider and vector store traits
//! - [`memory_store`] - In-memory vector store
//! - [`embedding_cache`] - Optional query embedding cache
//! - [`engine`] - The [`RetrievalEngine`] tying these together

pub mod classifier;
pub mod dedup;
pub mod embedding_cache;
pub mod engine;
pub mod filter;
pub mod memory_store;
pub mod provider;
pub mod types;

pub use classifier::{classify_query, dynamic_top_k, effective_threshold, effective_top_k, QueryType};
pub use dedup::{deduplicate, jaccard_similarity, normalize_text, semantic_fingerprint, word_set};
pub use embedding_cache::QueryEmbeddingCache;
pub use engine::RetrievalEngine;
pub use filter::{filter_low_value, is_low_value};
pub use memory_store::InMemoryVectorStore;
pub use provider::{EmbeddingProvider, VectorSearchResult, VectorStore};
pub use types::{
    MetadataFilter, RetrievalMetadata, RetrievalOptions, RetrievalResult,
    DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K,
};
