//! Chunkwise Core Library
//!
//! Core functionality for retrieval-augmented generation pipelines:
//! cleaning extracted text, splitting documents into chunks, vector
//! similarity primitives, and query-time retrieval over an external
//! embedding provider and vector store.
//!
//! # Examples
//!
//! ```
//! use chunkwise_core::chunking::{ChunkingOptions, ChunkingStrategy};
//! use chunkwise_core::cleanup::{clean_text, CleanupOptions};
//! use chunkwise_core::types::Document;
//!
//! let raw = "Home | Rust keeps memory safe.   It has no garbage collector!!!";
//! let content = clean_text(raw, &CleanupOptions::default());
//! let doc = Document::new("intro", content, "intro.html");
//!
//! let chunker = ChunkingStrategy::SentenceAware
//!     .build(&ChunkingOptions::default())
//!     .unwrap();
//! let chunks = chunker.chunk(&doc);
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].text, "Rust keeps memory safe. It has no garbage collector.");
//! ```

pub mod chunking;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod retrieval;
pub mod semantic;
pub mod types;

// Re-export commonly used types
pub use chunking::{
    Chunker, ChunkingError, ChunkingOptions, ChunkingStrategy, FixedSizeChunker,
    SentenceAwareChunker, SlidingWindowChunker,
};
pub use cleanup::{clean_text, CleanupOptions, TextCleaner};
pub use config::ChunkwiseConfig;
pub use error::{ChunkwiseError, Result};
pub use retrieval::{
    EmbeddingProvider, InMemoryVectorStore, MetadataFilter, QueryEmbeddingCache, QueryType,
    RetrievalEngine, RetrievalMetadata, RetrievalOptions, RetrievalResult, VectorSearchResult,
    VectorStore,
};
pub use semantic::{cosine_similarity, normalize, SentenceSplitter, SimilarityError};
pub use types::{Chunk, Document};

/// Initialize logging with custom configuration
///
/// Log lines go to stderr so command output on stdout stays parseable.
pub fn init_logging_with_config(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::new(level);
    let layer = log_layer(format, std::io::stderr)?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .map_err(|e| ChunkwiseError::config(format!("Failed to initialize logging: {}", e)))
}

/// Formatting layer for `format`, writing through `writer`
fn log_layer<S, W>(
    format: &str,
    writer: W,
) -> Result<Box<dyn tracing_subscriber::Layer<S> + Send + Sync>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    W: for<'a> tracing_subscriber::fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    use tracing_subscriber::{fmt, fmt::format::FmtSpan, Layer};

    let layer = match format {
        "json" => fmt::layer().json().with_writer(writer).boxed(),
        "text" | "pretty" => fmt::layer()
            .pretty()
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(writer)
            .boxed(),
        "compact" => fmt::layer().compact().with_writer(writer).boxed(),
        _ => {
            return Err(ChunkwiseError::validation(format!(
                "Unknown log format: {}",
                format
            )));
        }
    };

    Ok(layer)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version info as a formatted string
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
