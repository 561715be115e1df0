//! Benchmarks for query classification, deduplication and end-to-end
//! retrieval against the in-memory store
//!
//! Run with: cargo bench --bench retrieval_bench

use async_trait::async_trait;
use chunkwise_core::error::Result;
use chunkwise_core::retrieval::{
    classify_query, deduplicate, EmbeddingProvider, InMemoryVectorStore, RetrievalEngine,
    RetrievalOptions, RetrievalResult,
};
use chunkwise_core::types::{Chunk, Document};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Runtime;

const DIMENSIONS: usize = 64;

/// Deterministic embedding derived from character codes
struct HashEmbedder;

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(embed(text))
    }
}

fn embed(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0; DIMENSIONS];
    for (i, c) in text.chars().enumerate() {
        vector[(c as usize + i) % DIMENSIONS] += 1.0;
    }
    vector
}

fn chunk_texts(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "Chunk {} covers topic {} with details about item {} and more context.",
                i,
                i % 7,
                i % 13
            )
        })
        .collect()
}

fn bench_classification(c: &mut Criterion) {
    let queries = [
        "What is the capital of France?",
        "Explain how ownership works",
        "List all supported formats",
        "Summarize this document",
    ];

    c.bench_function("classify_query", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(classify_query(black_box(query)));
            }
        });
    });
}

fn bench_deduplication(c: &mut Criterion) {
    let doc = Document::new("bench", "", "bench.txt");
    let mut group = c.benchmark_group("deduplicate");

    for count in [15, 60, 240] {
        let results: Vec<RetrievalResult> = chunk_texts(count)
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                RetrievalResult::new(Chunk::from_document(&doc, i, text), 1.0 - i as f32 / 1000.0)
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &results, |b, results| {
            b.iter(|| deduplicate(black_box(results.clone()), 5));
        });
    }

    group.finish();
}

fn bench_retrieve(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = Arc::new(InMemoryVectorStore::new(DIMENSIONS));
    let engine = RetrievalEngine::new(Arc::new(HashEmbedder), store.clone());

    let doc = Document::new("bench", "", "bench.txt");
    for (i, text) in chunk_texts(1000).into_iter().enumerate() {
        let chunk = Chunk::from_document(&doc, i, text);
        store
            .upsert(chunk.id.clone(), embed(&chunk.text), HashMap::new())
            .unwrap();
        engine.register_chunk(chunk);
    }

    let options = RetrievalOptions::default();
    c.bench_function("retrieve_1000_chunks", |b| {
        b.to_async(&rt).iter(|| async {
            let results = engine
                .retrieve(black_box("Explain topic 3 details"), &options)
                .await
                .unwrap();
            black_box(results);
        });
    });
}

criterion_group!(benches, bench_classification, bench_deduplication, bench_retrieve);
criterion_main!(benches);
