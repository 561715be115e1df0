//! Chunkwise - text chunking and retrieval toolkit
//!
//! Chunkwise cleans text extracted from documents, splits it into chunks
//! ready for embedding, and classifies queries the way the retrieval engine
//! does when sizing its results.

use chunkwise_cli::{
    execute_command, exit_code_for_error, load_config, ChunkArgs, CleanArgs, ClassifyCommand,
    InitCommand, OutputFormat, OutputFormatter, ValidateCommand,
};
use chunkwise_core::{ChunkwiseConfig, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "chunkwise")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chunkwise - text cleanup, chunking and retrieval toolkit for RAG pipelines")]
#[command(long_about = r#"
Chunkwise prepares documents for retrieval-augmented generation.

Text is cleaned of extraction noise (timestamps, URLs, navigation menus),
then split with one of three strategies:
- fixed-size: contiguous character windows
- sliding-window: overlapping windows advanced by a constant step
- sentence-aware: whole sentences packed up to the size limit

Settings are read from chunkwise.yaml in the working directory, or from the
file given with --config.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove boilerplate noise from extracted text
    Clean(CleanArgs),

    /// Split documents into chunks
    Chunk(ChunkArgs),

    /// Classify a query and show its dynamic top-K
    Classify(ClassifyCommand),

    /// Write a default configuration file
    Init(InitCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(exit_code_for_error(&e));
    }
}

async fn run(cli: Cli) -> Result<()> {
    chunkwise_cli::init()?;

    let config = match &cli.command {
        Commands::Clean(_) | Commands::Chunk(_) => {
            let cwd = std::env::current_dir()?;
            load_config(cli.config.as_deref(), &cwd)?
        }
        _ => ChunkwiseConfig::default(),
    };

    let log_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    chunkwise_core::init_logging_with_config(log_level, log_format(cli.output, &config))?;

    info!("Starting Chunkwise v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Clean(args) => {
            execute_command(args.with_options(config.cleanup)).await?;
        }
        Commands::Chunk(args) => {
            execute_command(args.with_config(config).with_format(cli.output)).await?;
        }
        Commands::Classify(args) => {
            execute_command(args.with_format(cli.output)).await?;
        }
        Commands::Init(args) => {
            execute_command(args).await?;
        }
        Commands::Validate(args) => {
            execute_command(args.with_format(cli.output)).await?;
        }
        Commands::Version => {
            handle_version(cli.output)?;
        }
    }

    info!("Chunkwise completed successfully");
    Ok(())
}

/// Log format for this run
///
/// Structured output formats switch the logs to match; pretty output keeps
/// the configured log format.
fn log_format(output: OutputFormat, config: &ChunkwiseConfig) -> &str {
    match output {
        OutputFormat::Pretty => config.logging.format.as_str(),
        other => other.log_format(),
    }
}

fn handle_version(format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Pretty {
        println!("{}", chunkwise_core::version_info());
        println!("CLI version: {}", chunkwise_cli::VERSION);
        return Ok(());
    }

    let mut formatter = OutputFormatter::with_format(format, false);
    formatter.output(&json!({
        "name": chunkwise_core::NAME,
        "version": chunkwise_core::VERSION,
        "cli_version": chunkwise_cli::VERSION,
        "description": chunkwise_core::DESCRIPTION,
    }))
}
