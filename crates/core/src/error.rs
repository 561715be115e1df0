//! Error handling for the Chunkwise core library

use crate::chunking::ChunkingError;
use crate::semantic::similarity::SimilarityError;
use thiserror::Error;

/// Result type alias for Chunkwise operations
pub type Result<T> = std::result::Result<T, ChunkwiseError>;

/// Main error type for Chunkwise operations
#[derive(Error, Debug)]
pub enum ChunkwiseError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors
    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),

    /// Vector math errors
    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    /// Chunking errors
    #[error("Chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Embedding provider errors
    #[error("Embedding provider error: {message}")]
    Embedding { message: String },

    /// Vector store errors
    #[error("Vector store error: {message}")]
    VectorStore { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Resource not found errors
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },
}

impl ChunkwiseError {
    /// Create an embedding provider error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a vector store error
    pub fn vector_store<S: Into<String>>(message: S) -> Self {
        Self::VectorStore {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether the error came from one of the external collaborators
    /// (embedding provider or vector store)
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Embedding { .. } | Self::VectorStore { .. })
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Json(_) | Self::Yaml(_) => "serialization",
            Self::Generic(_) => "generic",
            Self::Similarity(_) => "similarity",
            Self::Chunking(_) => "chunking",
            Self::Embedding { .. } => "embedding",
            Self::VectorStore { .. } => "vector_store",
            Self::Config { .. } => "config",
            Self::Validation { .. } => "validation",
            Self::NotFound { .. } => "not_found",
        }
    }
}
