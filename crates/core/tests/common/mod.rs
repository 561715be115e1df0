//! Common test helpers for retrieval integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chunkwise_core::error::{ChunkwiseError, Result};
use chunkwise_core::retrieval::{
    EmbeddingProvider, InMemoryVectorStore, MetadataFilter, RetrievalEngine, VectorSearchResult,
    VectorStore,
};
use chunkwise_core::types::Chunk;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Keywords that make up the embedding space of [`KeywordEmbedder`]
pub const TOPICS: [&str; 8] = [
    "ownership", "borrow", "lifetime", "trait", "async", "closure", "iterator", "macro",
];

/// Embeds text as keyword occurrence counts over [`TOPICS`]
#[derive(Default)]
pub struct KeywordEmbedder {
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `embed` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Keyword occurrence vector for `text`
pub fn embed(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    TOPICS
        .iter()
        .map(|topic| lower.matches(topic).count() as f32)
        .collect()
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(embed(text))
    }
}

/// Vector store that is always unavailable
pub struct UnavailableStore;

#[async_trait]
impl VectorStore for UnavailableStore {
    async fn search(
        &self,
        _query: &[f32],
        _limit: usize,
        _threshold: f32,
        _filter: Option<&MetadataFilter>,
    ) -> Result<Vec<VectorSearchResult>> {
        Err(ChunkwiseError::vector_store("connection refused"))
    }
}

/// Engine over a fresh in-memory store
pub fn engine() -> (RetrievalEngine, Arc<InMemoryVectorStore>, Arc<KeywordEmbedder>) {
    let embedder = Arc::new(KeywordEmbedder::new());
    let store = Arc::new(InMemoryVectorStore::new(TOPICS.len()));
    let engine = RetrievalEngine::new(embedder.clone(), store.clone());
    (engine, store, embedder)
}

/// Embeds, stores and registers `chunks`
pub fn index_chunks(engine: &RetrievalEngine, store: &InMemoryVectorStore, chunks: Vec<Chunk>) {
    for chunk in &chunks {
        store
            .upsert(chunk.id.clone(), embed(&chunk.text), chunk.metadata.clone())
            .unwrap();
    }
    engine.register_chunks(chunks);
}

/// One sentence per topic
pub fn topic_sentences() -> Vec<&'static str> {
    vec![
        "Ownership means each value has exactly one owner at a time.",
        "Borrowing lets a function use a value through a reference.",
        "Lifetimes tell the compiler how long a reference stays valid.",
        "Traits describe behaviour that many types can share.",
        "Async functions return futures that an executor polls.",
        "Closures capture variables from the surrounding scope.",
        "Iterators yield items one at a time until they are exhausted.",
        "Macros generate code at compile time from token streams.",
    ]
}
