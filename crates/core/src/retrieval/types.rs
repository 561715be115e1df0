//! Retrieval request and response types

use super::classifier::QueryType;
use crate::types::Chunk;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Similarity threshold used when none is supplied
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.35;

/// Result count used when no usable top-K is supplied
pub const DEFAULT_TOP_K: usize = 3;

/// Exact-match conjunction of metadata constraints
///
/// An empty filter matches everything.
///
/// # Examples
///
/// ```
/// use chunkwise_core::retrieval::MetadataFilter;
/// use std::collections::HashMap;
///
/// let filter = MetadataFilter::new().with("source", "guide.pdf");
///
/// let mut metadata = HashMap::new();
/// metadata.insert("source".to_string(), "guide.pdf".to_string());
/// assert!(filter.matches(&metadata));
///
/// metadata.insert("source".to_string(), "other.pdf".to_string());
/// assert!(!filter.matches(&metadata));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataFilter {
    /// Required key/value pairs
    pub conditions: HashMap<String, String>,
}

impl MetadataFilter {
    /// Creates an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required key/value pair
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.insert(key.into(), value.into());
        self
    }

    /// Whether `metadata` satisfies every condition
    pub fn matches(&self, metadata: &HashMap<String, String>) -> bool {
        self.conditions
            .iter()
            .all(|(key, value)| metadata.get(key) == Some(value))
    }

    /// Whether the filter has no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Options for a single retrieval request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalOptions {
    /// Maximum results; 0 selects a count from the query type
    pub top_k: usize,

    /// Minimum similarity; values ≤ 0 fall back to the default
    pub similarity_threshold: f32,

    /// Whether `top_k == 0` sizes results from the query type
    pub enable_dynamic_top_k: bool,

    /// Whether near-duplicate results are suppressed
    pub enable_deduplication: bool,

    /// Optional metadata constraints passed to the vector store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_filter: Option<MetadataFilter>,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            top_k: 0,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            enable_dynamic_top_k: true,
            enable_deduplication: true,
            metadata_filter: None,
        }
    }
}

impl RetrievalOptions {
    /// Options requesting a fixed number of results
    pub fn with_top_k(top_k: usize) -> Self {
        Self {
            top_k,
            ..Default::default()
        }
    }

    /// Sets the metadata filter
    pub fn filter(mut self, filter: MetadataFilter) -> Self {
        self.metadata_filter = Some(filter);
        self
    }
}

/// A retrieved chunk and its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// The matching chunk
    pub chunk: Chunk,
    /// Similarity to the query in `[0.0, 1.0]`
    pub similarity: f32,
    /// Source of the owning document
    pub source: Option<String>,
    /// Page number of the owning document
    pub page_number: Option<u32>,
}

impl RetrievalResult {
    /// Wraps a chunk, carrying over its source and page number
    pub fn new(chunk: Chunk, similarity: f32) -> Self {
        let source = chunk.source().map(str::to_string);
        let page_number = chunk.page_number();
        Self {
            chunk,
            similarity,
            source,
            page_number,
        }
    }

    /// The chunk text
    pub fn text(&self) -> &str {
        &self.chunk.text
    }
}

/// Parameters a retrieval actually used
///
/// `chunks_before_deduplication` counts cache hits before the low-value
/// filter as well as before deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalMetadata {
    pub effective_top_k: usize,
    pub effective_threshold: f32,
    pub query_type: QueryType,
    pub chunks_before_deduplication: usize,
    pub dynamic_top_k_used: bool,
    pub deduplication_applied: bool,
}
