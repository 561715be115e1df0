//! Query embedding cache
//!
//! Repeated queries can skip the embedding provider when a
//! [`QueryEmbeddingCache`] is attached to the retrieval engine. Entries are
//! evicted by capacity and expire after a time-to-live.
//!
//! # Examples
//!
//! ```rust
//! use chunkwise_core::retrieval::QueryEmbeddingCache;
//!
//! # tokio_test::block_on(async {
//! let cache = QueryEmbeddingCache::new(1000);
//!
//! cache.insert("what is ownership", vec![0.1, 0.2, 0.3]).await;
//! assert!(cache.get("what is ownership").await.is_some());
//! # });
//! ```

use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Default time-to-live for cached query embeddings
pub const DEFAULT_TTL_SECONDS: u64 = 3600;

/// Query text to embedding cache
#[derive(Clone)]
pub struct QueryEmbeddingCache {
    cache: Cache<String, Arc<Vec<f32>>>,
}

impl QueryEmbeddingCache {
    /// Creates a cache holding up to `capacity` embeddings for one hour each
    pub fn new(capacity: u64) -> Self {
        Self::with_ttl(capacity, DEFAULT_TTL_SECONDS)
    }

    /// Creates a cache with a custom time-to-live
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkwise_core::retrieval::QueryEmbeddingCache;
    ///
    /// let cache = QueryEmbeddingCache::with_ttl(500, 600);
    /// assert_eq!(cache.entry_count(), 0);
    /// ```
    pub fn with_ttl(capacity: u64, ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(Duration::from_secs(ttl_seconds))
            .build();

        debug!(
            "Created query embedding cache with capacity {} and TTL {}s",
            capacity, ttl_seconds
        );

        Self { cache }
    }

    /// Caches the embedding of `query`
    pub async fn insert(&self, query: impl Into<String>, embedding: Vec<f32>) {
        let query = query.into();
        trace!(
            "Caching embedding for query '{}' (dimension: {})",
            query,
            embedding.len()
        );
        self.cache.insert(query, Arc::new(embedding)).await;
    }

    /// Cached embedding of `query`, if any
    pub async fn get(&self, query: &str) -> Option<Arc<Vec<f32>>> {
        let result = self.cache.get(query).await;
        if result.is_some() {
            trace!("Embedding cache hit for query '{}'", query);
        } else {
            trace!("Embedding cache miss for query '{}'", query);
        }
        result
    }

    /// Removes the entry for `query`
    pub async fn invalidate(&self, query: &str) {
        debug!("Invalidating cached embedding for query '{}'", query);
        self.cache.invalidate(query).await;
    }

    /// Removes every entry
    pub async fn clear(&self) {
        debug!("Clearing query embedding cache");
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Approximate number of cached embeddings
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Returns the cached embedding of `query` or computes and caches it
    ///
    /// Errors from `compute` are returned as-is and nothing is cached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkwise_core::retrieval::QueryEmbeddingCache;
    ///
    /// # tokio_test::block_on(async {
    /// let cache = QueryEmbeddingCache::new(10);
    /// let embedding = cache
    ///     .get_or_compute("query", |_| async { Ok::<_, std::io::Error>(vec![1.0, 0.0]) })
    ///     .await
    ///     .unwrap();
    /// assert_eq!(*embedding, vec![1.0, 0.0]);
    /// # });
    /// ```
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        query: &str,
        compute: F,
    ) -> std::result::Result<Arc<Vec<f32>>, E>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = std::result::Result<Vec<f32>, E>>,
    {
        if let Some(cached) = self.get(query).await {
            return Ok(cached);
        }

        let embedding = Arc::new(compute(query.to_string()).await?);
        self.cache
            .insert(query.to_string(), Arc::clone(&embedding))
            .await;

        Ok(embedding)
    }
}

impl Default for QueryEmbeddingCache {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl std::fmt::Debug for QueryEmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEmbeddingCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
