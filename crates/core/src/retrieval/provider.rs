//! External collaborators of the retrieval engine
//!
//! Embedding generation and vector search live outside this crate. The
//! engine talks to them only through these traits; provider and store errors
//! reach the caller unchanged.

use super::types::MetadataFilter;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Turns text into an embedding vector
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds `text`
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// A ranked vector search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSearchResult {
    /// Id the vector was stored under, the chunk id
    pub id: String,
    /// Similarity to the query vector
    pub similarity: f32,
    /// Metadata stored with the vector
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Searches stored vectors by similarity
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Returns at most `limit` hits with similarity ≥ `threshold` matching
    /// `filter`, most similar first
    async fn search(
        &self,
        query: &[f32],
        limit: usize,
        threshold: f32,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<VectorSearchResult>>;
}
