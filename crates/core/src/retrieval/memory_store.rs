//! In-memory vector store
//!
//! Brute-force cosine search over normalized vectors held in a
//! `parking_lot::RwLock`. Suited to tests, demos and small corpora.

use super::provider::{VectorSearchResult, VectorStore};
use super::types::MetadataFilter;
use crate::error::{ChunkwiseError, Result};
use crate::semantic::{cosine_similarity, normalize};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct StoredVector {
    vector: Vec<f32>,
    metadata: HashMap<String, String>,
}

/// Vector store keeping every vector in memory
///
/// # Examples
///
/// ```
/// use chunkwise_core::retrieval::{InMemoryVectorStore, VectorStore};
/// use std::collections::HashMap;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryVectorStore::new(2);
/// store.upsert("a", vec![1.0, 0.0], HashMap::new()).unwrap();
/// store.upsert("b", vec![0.0, 1.0], HashMap::new()).unwrap();
///
/// let hits = store.search(&[1.0, 0.1], 10, 0.5, None).await.unwrap();
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id, "a");
/// # });
/// ```
#[derive(Debug)]
pub struct InMemoryVectorStore {
    dimensions: usize,
    vectors: RwLock<HashMap<String, StoredVector>>,
}

impl InMemoryVectorStore {
    /// Creates an empty store for vectors of length `dimensions`
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: RwLock::new(HashMap::new()),
        }
    }

    /// Vector length accepted by this store
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Stores `vector` under `id`, replacing any previous entry
    ///
    /// # Errors
    ///
    /// Returns a validation error if the vector length differs from
    /// [`dimensions`](Self::dimensions).
    pub fn upsert(
        &self,
        id: impl Into<String>,
        vector: Vec<f32>,
        metadata: HashMap<String, String>,
    ) -> Result<()> {
        if vector.len() != self.dimensions {
            return Err(ChunkwiseError::validation(format!(
                "vector dimension {} does not match store dimension {}",
                vector.len(),
                self.dimensions
            )));
        }

        let id = id.into();
        trace!("Upserting vector {}", id);
        self.vectors.write().insert(
            id,
            StoredVector {
                vector: normalize(&vector),
                metadata,
            },
        );
        Ok(())
    }

    /// Removes the vector stored under `id`, returning whether it existed
    pub fn delete(&self, id: &str) -> bool {
        self.vectors.write().remove(id).is_some()
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        self.vectors.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.vectors.read().is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn search(
        &self,
        query: &[f32],
        limit: usize,
        threshold: f32,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<VectorSearchResult>> {
        let query = normalize(query);
        let vectors = self.vectors.read();

        let mut hits = Vec::new();
        for (id, stored) in vectors.iter() {
            if let Some(filter) = filter {
                if !filter.matches(&stored.metadata) {
                    continue;
                }
            }

            let similarity = cosine_similarity(&query, &stored.vector)?.clamp(0.0, 1.0);
            if similarity < threshold {
                continue;
            }

            hits.push(VectorSearchResult {
                id: id.clone(),
                similarity,
                metadata: stored.metadata.clone(),
            });
        }
        drop(vectors);

        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(limit);

        debug!("In-memory search returned {} hits", hits.len());
        Ok(hits)
    }
}
