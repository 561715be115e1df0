//! Retrieval engine
//!
//! The engine owns a cache of registered chunks and answers queries by
//! embedding them, over-fetching candidates from the vector store, mapping
//! hits back to cached chunks and trimming the result set.
//!
//! # Concurrency
//!
//! The chunk cache sits behind a `parking_lot::RwLock`. Registration takes
//! the write lock. Retrieval takes the read lock only while mapping search
//! hits to chunks and never holds it across an `.await`, so chunks can be
//! registered while queries run. Each retrieval observes every registration
//! call either entirely or not at all.
//!
//! Dropping a `retrieve` future cancels whichever provider or store call is
//! in flight.

use super::classifier::{classify_query, effective_threshold, effective_top_k, QueryType};
use super::dedup::deduplicate;
use super::embedding_cache::QueryEmbeddingCache;
use super::filter::filter_low_value;
use super::provider::{EmbeddingProvider, VectorStore};
use super::types::{RetrievalMetadata, RetrievalOptions, RetrievalResult, DEFAULT_TOP_K};
use crate::error::Result;
use crate::types::Chunk;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Minimum number of candidates requested from the vector store
pub const MIN_CANDIDATES: usize = 15;

/// Candidates requested per wanted result
pub const OVERFETCH_FACTOR: usize = 3;

/// Answers queries against registered chunks
///
/// Chunks must be registered with the engine and stored in the vector store
/// under their chunk id. Keeping the two in sync is the caller's job; store
/// hits without a registered chunk are skipped.
///
/// # Examples
///
/// ```
/// use chunkwise_core::error::Result;
/// use chunkwise_core::retrieval::{
///     EmbeddingProvider, InMemoryVectorStore, RetrievalEngine, RetrievalOptions,
/// };
/// use chunkwise_core::types::{Chunk, Document};
/// use async_trait::async_trait;
/// use std::collections::HashMap;
/// use std::sync::Arc;
///
/// struct LengthEmbedder;
///
/// #[async_trait]
/// impl EmbeddingProvider for LengthEmbedder {
///     async fn embed(&self, text: &str) -> Result<Vec<f32>> {
///         Ok(vec![1.0, text.len() as f32 / 100.0])
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let store = Arc::new(InMemoryVectorStore::new(2));
/// let engine = RetrievalEngine::new(Arc::new(LengthEmbedder), store.clone());
///
/// let doc = Document::new("doc", "", "guide.txt");
/// let chunk = Chunk::from_document(&doc, 0, "Ownership gives every value a single owner.");
/// store.upsert(chunk.id.clone(), vec![1.0, 0.4], HashMap::new()).unwrap();
/// engine.register_chunk(chunk);
///
/// let results = engine
///     .retrieve("Explain ownership", &RetrievalOptions::default())
///     .await
///     .unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].source.as_deref(), Some("guide.txt"));
/// # });
/// ```
pub struct RetrievalEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
    chunks: Arc<RwLock<HashMap<String, Chunk>>>,
    embedding_cache: Option<QueryEmbeddingCache>,
    default_top_k: usize,
}

impl RetrievalEngine {
    /// Creates an engine with an empty chunk cache
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedder,
            store,
            chunks: Arc::new(RwLock::new(HashMap::new())),
            embedding_cache: None,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Sets the result count used for general queries and when no top-K is
    /// requested
    pub fn with_default_top_k(mut self, default_top_k: usize) -> Self {
        self.default_top_k = default_top_k;
        self
    }

    /// Caches query embeddings so repeated queries skip the provider
    pub fn with_embedding_cache(mut self, cache: QueryEmbeddingCache) -> Self {
        self.embedding_cache = Some(cache);
        self
    }

    /// Default top-K of this engine
    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Registers a chunk, replacing any chunk with the same id
    pub fn register_chunk(&self, chunk: Chunk) {
        trace!("Registering chunk {}", chunk.id);
        self.chunks.write().insert(chunk.id.clone(), chunk);
    }

    /// Registers several chunks under a single write lock
    pub fn register_chunks<I>(&self, chunks: I)
    where
        I: IntoIterator<Item = Chunk>,
    {
        let mut cache = self.chunks.write();
        let before = cache.len();
        for chunk in chunks {
            cache.insert(chunk.id.clone(), chunk);
        }
        debug!(
            "Registered chunks, cache size {} -> {}",
            before,
            cache.len()
        );
    }

    /// Registered chunk with the given id
    pub fn get_chunk(&self, chunk_id: &str) -> Option<Chunk> {
        self.chunks.read().get(chunk_id).cloned()
    }

    /// Number of registered chunks
    pub fn cached_chunk_count(&self) -> usize {
        self.chunks.read().len()
    }

    /// Removes every registered chunk
    pub fn clear_chunks(&self) {
        self.chunks.write().clear();
        debug!("Cleared chunk cache");
    }

    /// Classifies a query
    pub fn classify(&self, query: &str) -> QueryType {
        classify_query(query)
    }

    /// Retrieves the chunks most relevant to `query`
    ///
    /// # Errors
    ///
    /// Returns any error raised by the embedding provider or vector store.
    pub async fn retrieve(
        &self,
        query: &str,
        options: &RetrievalOptions,
    ) -> Result<Vec<RetrievalResult>> {
        let (results, _) = self.retrieve_with_metadata(query, options).await?;
        Ok(results)
    }

    /// Retrieves the chunks most relevant to `query` along with the
    /// parameters that were used
    ///
    /// # Errors
    ///
    /// Returns any error raised by the embedding provider or vector store.
    pub async fn retrieve_with_metadata(
        &self,
        query: &str,
        options: &RetrievalOptions,
    ) -> Result<(Vec<RetrievalResult>, RetrievalMetadata)> {
        let query_type = classify_query(query);
        let (top_k, dynamic_top_k_used) = effective_top_k(
            query_type,
            options.top_k,
            options.enable_dynamic_top_k,
            self.default_top_k,
        );
        let threshold = effective_threshold(options.similarity_threshold);
        debug!(
            "Query classified as {} (top_k {}, threshold {})",
            query_type, top_k, threshold
        );

        let query_vector = self.embed_query(query).await?;

        let limit = top_k.saturating_mul(OVERFETCH_FACTOR).max(MIN_CANDIDATES);
        let hits = self
            .store
            .search(
                &query_vector,
                limit,
                threshold,
                options.metadata_filter.as_ref(),
            )
            .await?;

        let candidates: Vec<RetrievalResult> = {
            let cache = self.chunks.read();
            hits.into_iter()
                .filter_map(|hit| match cache.get(&hit.id) {
                    Some(chunk) => Some(RetrievalResult::new(chunk.clone(), hit.similarity)),
                    None => {
                        trace!("No cached chunk for vector {}", hit.id);
                        None
                    }
                })
                .collect()
        };
        let chunks_before_deduplication = candidates.len();

        let filtered = filter_low_value(candidates, threshold);
        debug!(
            "{} of {} candidates passed the low-value filter",
            filtered.len(),
            chunks_before_deduplication
        );

        let results = if options.enable_deduplication {
            deduplicate(filtered, top_k)
        } else {
            filtered.into_iter().take(top_k).collect()
        };

        info!(
            "Retrieved {} chunks for {} query (top_k {}, {} candidates)",
            results.len(),
            query_type,
            top_k,
            chunks_before_deduplication
        );

        let metadata = RetrievalMetadata {
            effective_top_k: top_k,
            effective_threshold: threshold,
            query_type,
            chunks_before_deduplication,
            dynamic_top_k_used,
            deduplication_applied: options.enable_deduplication,
        };

        Ok((results, metadata))
    }

    async fn embed_query(&self, query: &str) -> Result<Arc<Vec<f32>>> {
        match &self.embedding_cache {
            Some(cache) => {
                cache
                    .get_or_compute(query, |q| async move { self.embedder.embed(&q).await })
                    .await
            }
            None => Ok(Arc::new(self.embedder.embed(query).await?)),
        }
    }
}

impl std::fmt::Debug for RetrievalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("cached_chunks", &self.cached_chunk_count())
            .field("default_top_k", &self.default_top_k)
            .field("embedding_cache", &self.embedding_cache)
            .finish()
    }
}
