//! Clean command implementation
//!
//! Applies the cleanup passes to an extracted text file and prints the
//! result, or writes it to `--out-file`.

use crate::commands::CliCommand;

use chunkwise_core::{ChunkwiseError, CleanupOptions, Result, TextCleaner};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

/// Remove boilerplate noise from extracted text
#[derive(Debug, Clone, Args)]
pub struct CleanArgs {
    /// Text file to clean
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the cleaned text here instead of stdout
    #[arg(long = "out-file")]
    pub out_file: Option<PathBuf>,

    /// Keep URLs
    #[arg(long)]
    pub keep_urls: bool,

    /// Keep dates and timestamps
    #[arg(long)]
    pub keep_timestamps: bool,

    /// Keep navigation menu fragments
    #[arg(long)]
    pub keep_navigation: bool,

    /// Cleanup options from the loaded configuration
    #[arg(skip)]
    pub base_options: CleanupOptions,
}

impl CleanArgs {
    /// Use `options` as the starting point for the `--keep-*` overrides
    pub fn with_options(mut self, options: CleanupOptions) -> Self {
        self.base_options = options;
        self
    }

    /// Cleanup options after applying the command line overrides
    pub fn cleanup_options(&self) -> CleanupOptions {
        let mut options = self.base_options;
        if self.keep_urls {
            options.remove_urls = false;
        }
        if self.keep_timestamps {
            options.remove_timestamps = false;
        }
        if self.keep_navigation {
            options.remove_navigation = false;
        }
        options
    }

    /// Read and clean the input file
    pub async fn clean_file(&self) -> Result<String> {
        let raw = tokio::fs::read_to_string(&self.input).await?;
        let cleaned = TextCleaner::new(self.cleanup_options()).clean(&raw);
        info!(
            "Cleaned {:?}: {} chars -> {} chars",
            self.input,
            raw.chars().count(),
            cleaned.chars().count()
        );
        Ok(cleaned)
    }
}

impl CliCommand for CleanArgs {
    async fn execute(&self) -> Result<()> {
        let cleaned = self.clean_file().await?;

        match &self.out_file {
            Some(path) => {
                tokio::fs::write(path, &cleaned).await?;
                info!("Wrote cleaned text to {:?}", path);
            }
            None => println!("{}", cleaned),
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "clean"
    }

    fn validate(&self) -> Result<()> {
        ensure_input_file(&self.input)
    }
}

/// Require `path` to be an existing regular file
pub(crate) fn ensure_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ChunkwiseError::not_found(format!(
            "Input file not found: {:?}",
            path
        )));
    }
    if !path.is_file() {
        return Err(ChunkwiseError::validation(format!(
            "Input path is not a file: {:?}",
            path
        )));
    }
    Ok(())
}
