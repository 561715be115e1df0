//! Configuration types for the Chunkwise core library

use crate::chunking::{ChunkingOptions, ChunkingStrategy};
use crate::cleanup::CleanupOptions;
use crate::retrieval::{QueryEmbeddingCache, RetrievalOptions};
use crate::{ChunkwiseError, Result};
use serde::{Deserialize, Serialize};

/// Log formats accepted by [`LoggingConfig::format`]
pub const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkwiseConfig {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: String,
    /// Chunking settings
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Text cleanup toggles
    #[serde(default)]
    pub cleanup: CleanupOptions,
    /// Retrieval settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ChunkwiseConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            chunking: ChunkingConfig::default(),
            cleanup: CleanupOptions::default(),
            retrieval: RetrievalConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Strategy used to split documents
    ///
    /// When unset, `respect_sentence_boundaries` picks between sentence-aware
    /// and fixed-size chunking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ChunkingStrategy>,
    /// Target chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Characters of overlap between consecutive chunks
    #[serde(default = "default_overlap_size")]
    pub overlap_size: usize,
    /// Whether chunk boundaries should fall between sentences
    #[serde(default = "default_true")]
    pub respect_sentence_boundaries: bool,
    /// Maximum sentences per chunk for sentence-aware chunking
    #[serde(default = "default_max_sentences")]
    pub max_sentences_per_chunk: Option<usize>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: None,
            chunk_size: default_chunk_size(),
            overlap_size: default_overlap_size(),
            respect_sentence_boundaries: true,
            max_sentences_per_chunk: default_max_sentences(),
        }
    }
}

impl ChunkingConfig {
    /// Chunking options described by this configuration
    pub fn to_options(&self) -> ChunkingOptions {
        ChunkingOptions {
            chunk_size: self.chunk_size,
            overlap_size: self.overlap_size,
            respect_sentence_boundaries: self.respect_sentence_boundaries,
            max_sentences_per_chunk: self.max_sentences_per_chunk,
        }
    }

    /// Configured strategy, or the one implied by the chunking options
    pub fn effective_strategy(&self) -> ChunkingStrategy {
        self.strategy
            .unwrap_or_else(|| ChunkingStrategy::from_options(&self.to_options()))
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Result count for general queries and when none is requested
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,
    /// Minimum similarity for returned chunks
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
    /// Size results from the query type when no top-K is requested
    #[serde(default = "default_true")]
    pub enable_dynamic_top_k: bool,
    /// Suppress near-duplicate results
    #[serde(default = "default_true")]
    pub enable_deduplication: bool,
    /// Query embedding cache capacity; 0 disables the cache
    #[serde(default)]
    pub embedding_cache_size: u64,
    /// Query embedding cache time-to-live
    #[serde(default = "default_cache_ttl")]
    pub embedding_cache_ttl_seconds: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            similarity_threshold: default_similarity_threshold(),
            enable_dynamic_top_k: true,
            enable_deduplication: true,
            embedding_cache_size: 0,
            embedding_cache_ttl_seconds: default_cache_ttl(),
        }
    }
}

impl RetrievalConfig {
    /// Per-request options with dynamic sizing left to the engine
    pub fn to_options(&self) -> RetrievalOptions {
        RetrievalOptions {
            top_k: 0,
            similarity_threshold: self.similarity_threshold,
            enable_dynamic_top_k: self.enable_dynamic_top_k,
            enable_deduplication: self.enable_deduplication,
            metadata_filter: None,
        }
    }

    /// Query embedding cache, when enabled
    pub fn embedding_cache(&self) -> Option<QueryEmbeddingCache> {
        (self.embedding_cache_size > 0).then(|| {
            QueryEmbeddingCache::with_ttl(
                self.embedding_cache_size,
                self.embedding_cache_ttl_seconds,
            )
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty, or compact)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ChunkwiseConfig {
    /// Load configuration from a YAML or JSON file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Try YAML first, then JSON
        match serde_yaml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(_) => {
                let config = serde_json::from_str(&content)?;
                Ok(config)
            }
        }
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.chunking.to_options().validate()?;

        if !(0.0..=1.0).contains(&self.retrieval.similarity_threshold) {
            return Err(ChunkwiseError::validation(format!(
                "similarity_threshold must be between 0.0 and 1.0, got {}",
                self.retrieval.similarity_threshold
            )));
        }

        if self.retrieval.embedding_cache_size > 0 && self.retrieval.embedding_cache_ttl_seconds == 0
        {
            return Err(ChunkwiseError::validation(
                "embedding_cache_ttl_seconds must be greater than 0 when the cache is enabled",
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ChunkwiseError::validation(format!(
                "Unknown log format '{}', expected one of: {}",
                self.logging.format,
                LOG_FORMATS.join(", ")
            )));
        }

        Ok(())
    }
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_version() -> String {
    "1.0".to_string()
}
fn default_chunk_size() -> usize {
    crate::chunking::DEFAULT_CHUNK_SIZE
}
fn default_overlap_size() -> usize {
    crate::chunking::DEFAULT_OVERLAP_SIZE
}
fn default_max_sentences() -> Option<usize> {
    Some(crate::chunking::DEFAULT_MAX_SENTENCES_PER_CHUNK)
}
fn default_top_k() -> usize {
    crate::retrieval::DEFAULT_TOP_K
}
fn default_similarity_threshold() -> f32 {
    crate::retrieval::DEFAULT_SIMILARITY_THRESHOLD
}
fn default_cache_ttl() -> u64 {
    crate::retrieval::embedding_cache::DEFAULT_TTL_SECONDS
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}
