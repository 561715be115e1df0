//! Chunkwise CLI Library
//!
//! Command-line interface components for the Chunkwise chunking and
//! retrieval toolkit.

use chunkwise_core::{ChunkwiseError, Result};

pub mod commands;
pub mod config;
pub mod output;

pub use commands::*;
pub use config::*;
pub use output::*;

/// CLI version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the CLI environment
pub fn init() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("Chunkwise CLI encountered an error: {}", info);
    }));

    Ok(())
}

/// Get the appropriate exit code for an error
pub fn exit_code_for_error(error: &ChunkwiseError) -> i32 {
    match error {
        ChunkwiseError::Validation { .. }
        | ChunkwiseError::Config { .. }
        | ChunkwiseError::Chunking(_) => 2,
        ChunkwiseError::NotFound { .. } => 3,
        ChunkwiseError::Io(_) => 4,
        ChunkwiseError::Embedding { .. } | ChunkwiseError::VectorStore { .. } => 5,
        _ => 1,
    }
}
