//! CLI command for document chunking
//!
//! This command cleans text documents and splits them into chunks ready for
//! embedding, optionally writing one JSON file of chunks per input.
//!
//! # Examples
//!
//! ```bash
//! # Chunk a single document with the configured strategy
//! chunkwise chunk --input docs/guide.txt
//!
//! # Fixed-size windows without overlap
//! chunkwise chunk --input docs/api.txt --strategy fixed-size --overlap 0
//!
//! # Chunk several documents and write the chunks to disk
//! chunkwise chunk --input a.txt --input b.txt --output-dir ./chunks
//!
//! # Dry run to preview chunk counts
//! chunkwise chunk --input docs/guide.txt --dry-run
//! ```

use crate::commands::clean::ensure_input_file;
use crate::commands::CliCommand;
use crate::config::OutputFormat;
use crate::output::OutputFormatter;

use chunkwise_core::{
    Chunk, Chunker, ChunkingOptions, ChunkingStrategy, ChunkwiseConfig, ChunkwiseError, Document,
    Result, TextCleaner,
};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Chunking strategy selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Fixed-size character windows
    FixedSize,
    /// Overlapping windows advanced by a constant step
    SlidingWindow,
    /// Whole sentences packed up to the size limit
    SentenceAware,
}

impl From<StrategyArg> for ChunkingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::FixedSize => ChunkingStrategy::FixedSize,
            StrategyArg::SlidingWindow => ChunkingStrategy::SlidingWindow,
            StrategyArg::SentenceAware => ChunkingStrategy::SentenceAware,
        }
    }
}

/// Arguments for the chunk command
///
/// Values not given on the command line come from the loaded configuration.
#[derive(Debug, Clone, Args)]
pub struct ChunkArgs {
    /// Input file(s) to process
    #[arg(short, long, required = true)]
    pub input: Vec<PathBuf>,

    /// Chunking strategy (overrides config)
    #[arg(short, long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Maximum chunk size in characters (overrides config)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between consecutive chunks in characters (overrides config)
    #[arg(long)]
    pub overlap: Option<usize>,

    /// Maximum sentences per chunk for sentence-aware chunking
    #[arg(long)]
    pub max_sentences: Option<usize>,

    /// Chunk the raw text without running the cleanup passes
    #[arg(long)]
    pub no_clean: bool,

    /// Directory for `<name>_chunks.json` files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Report chunk counts without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Loaded configuration
    #[arg(skip)]
    pub settings: ChunkwiseConfig,

    /// Format of the run report
    #[arg(skip)]
    pub format: OutputFormat,
}

/// Chunks written for one input file
#[derive(Debug, Serialize)]
struct ChunkFile<'a> {
    source: String,
    strategy: ChunkingStrategy,
    chunk_count: usize,
    chunks: &'a [Chunk],
}

/// Outcome of a chunk run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkReport {
    /// Files given on the command line
    pub files: usize,
    /// Files chunked without error
    pub successful: usize,
    /// Files that could not be read or written
    pub failed: usize,
    /// Chunks produced across all files
    pub total_chunks: usize,
    /// Files written to the output directory
    pub written: Vec<PathBuf>,
}

impl ChunkArgs {
    /// Use `settings` for values not given on the command line
    pub fn with_config(mut self, settings: ChunkwiseConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Report the run in `format`
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Effective strategy
    pub fn strategy(&self) -> ChunkingStrategy {
        self.strategy
            .map(ChunkingStrategy::from)
            .unwrap_or_else(|| self.settings.chunking.effective_strategy())
    }

    /// Effective chunking options
    pub fn chunking_options(&self) -> ChunkingOptions {
        let mut options = self.settings.chunking.to_options();

        if let Some(chunk_size) = self.chunk_size {
            options.chunk_size = chunk_size;
        }
        if let Some(overlap) = self.overlap {
            options.overlap_size = overlap;
        }
        if let Some(max_sentences) = self.max_sentences {
            options.max_sentences_per_chunk = Some(max_sentences);
        }

        options
    }

    /// Validate command arguments
    pub fn validate(&self) -> Result<()> {
        let mut stems: HashMap<String, &PathBuf> = HashMap::new();
        for path in &self.input {
            ensure_input_file(path)?;

            // Chunk IDs and output file names both derive from the stem
            if let Some(first) = stems.insert(document_id(path), path) {
                return Err(ChunkwiseError::validation(format!(
                    "Inputs {:?} and {:?} share the file name {:?}; chunk IDs would collide",
                    first,
                    path,
                    document_id(path)
                )));
            }
        }

        if let Some(output_dir) = &self.output_dir {
            if output_dir.exists() && !output_dir.is_dir() {
                return Err(ChunkwiseError::validation(format!(
                    "Output path exists but is not a directory: {:?}",
                    output_dir
                )));
            }
        }

        self.chunking_options().validate()?;
        Ok(())
    }

    /// Chunk every input file and write the results
    ///
    /// Unreadable files are counted as failures and skipped.
    pub async fn run(&self) -> Result<ChunkReport> {
        let strategy = self.strategy();
        let options = self.chunking_options();
        let chunker = strategy.build(&options)?;

        info!("Configuration:");
        info!("  Strategy: {}", strategy);
        info!("  Chunk size: {}", options.chunk_size);
        info!("  Overlap: {}", options.overlap_size);
        info!("  Clean: {}", !self.no_clean);
        info!("  Dry run: {}", self.dry_run);

        if let Some(output_dir) = &self.output_dir {
            if !self.dry_run && !output_dir.exists() {
                tokio::fs::create_dir_all(output_dir).await?;
                info!("Created output directory: {:?}", output_dir);
            }
        }

        let mut report = ChunkReport {
            files: self.input.len(),
            ..ChunkReport::default()
        };

        for (index, path) in self.input.iter().enumerate() {
            info!(
                "Processing file {}/{}: {:?}",
                index + 1,
                self.input.len(),
                path
            );

            let chunks = match self.chunk_file(chunker.as_ref(), path).await {
                Ok(chunks) => chunks,
                Err(e) => {
                    warn!("Failed to chunk {:?}: {}", path, e);
                    report.failed += 1;
                    continue;
                }
            };
            report.total_chunks += chunks.len();

            match (&self.output_dir, self.dry_run) {
                (Some(output_dir), false) => {
                    match write_chunks(output_dir, path, strategy, &chunks).await {
                        Ok(written) => report.written.push(written),
                        Err(e) => {
                            warn!("Failed to write chunks for {:?}: {}", path, e);
                            report.failed += 1;
                            continue;
                        }
                    }
                }
                (_, true) => info!("  [DRY RUN] {} chunks from {:?}", chunks.len(), path),
                _ => {}
            }

            report.successful += 1;
        }

        if report.failed > 0 {
            warn!("{} files failed to process", report.failed);
        }

        Ok(report)
    }

    /// Read, clean and chunk one file
    async fn chunk_file(&self, chunker: &dyn Chunker, path: &Path) -> Result<Vec<Chunk>> {
        let raw = tokio::fs::read_to_string(path).await?;
        let content = if self.no_clean {
            raw
        } else {
            TextCleaner::new(self.settings.cleanup).clean(&raw)
        };

        let document = Document::new(document_id(path), content, path.display().to_string());
        let chunks = chunker.chunk(&document);
        debug!("{} produced {} chunks for {:?}", chunker.name(), chunks.len(), path);
        Ok(chunks)
    }
}

impl CliCommand for ChunkArgs {
    async fn execute(&self) -> Result<()> {
        info!("Starting document chunking");

        let report = self.run().await?;

        if self.format != OutputFormat::Pretty {
            return OutputFormatter::with_format(self.format, false).output(&report);
        }

        println!();
        println!("╔══════════════════════════════════════╗");
        println!("║      Chunking Summary                ║");
        println!("╠══════════════════════════════════════╣");
        println!("║ Total files:      {:>18} ║", report.files);
        println!("║ Successful:       {:>18} ║", report.successful);
        println!("║ Failed:           {:>18} ║", report.failed);
        println!("║ Total chunks:     {:>18} ║", report.total_chunks);
        if !self.dry_run && self.output_dir.is_some() {
            println!("║ Files written:    {:>18} ║", report.written.len());
        }
        println!("╚══════════════════════════════════════╝");

        Ok(())
    }

    fn name(&self) -> &'static str {
        "chunk"
    }

    fn validate(&self) -> Result<()> {
        self.validate()
    }
}

/// Document ID derived from the file stem
fn document_id(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("document")
        .to_string()
}

/// Write `chunks` to `<output_dir>/<stem>_chunks.json`
async fn write_chunks(
    output_dir: &Path,
    source: &Path,
    strategy: ChunkingStrategy,
    chunks: &[Chunk],
) -> Result<PathBuf> {
    let target = output_dir.join(format!("{}_chunks.json", document_id(source)));
    let file = ChunkFile {
        source: source.display().to_string(),
        strategy,
        chunk_count: chunks.len(),
        chunks,
    };

    let json = serde_json::to_string_pretty(&file)?;
    tokio::fs::write(&target, json).await?;
    debug!("Wrote {} chunks to {:?}", chunks.len(), target);
    Ok(target)
}
