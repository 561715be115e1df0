//! Classify command implementation for query type detection

use crate::commands::CliCommand;
use crate::config::OutputFormat;
use crate::output::OutputFormatter;

use chunkwise_core::retrieval::{classify_query, dynamic_top_k, QueryType};
use chunkwise_core::{ChunkwiseError, Result};
use clap::Args;
use serde::Serialize;

/// Classify a query and report the number of chunks it would retrieve
#[derive(Debug, Clone, Args)]
pub struct ClassifyCommand {
    /// Query to classify
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Default number of results for queries without a specific type
    #[arg(long, default_value = "3")]
    pub default_top_k: usize,

    /// Format of the classification report
    #[arg(skip)]
    pub format: OutputFormat,
}

/// Classification details for a single query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationOutput {
    pub query: String,
    pub query_type: QueryType,
    pub top_k: usize,
    pub default_top_k: usize,
}

impl ClassifyCommand {
    /// Report the classification in `format`
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Classify the query
    pub fn classify(&self) -> ClassificationOutput {
        let query_type = classify_query(&self.query);
        ClassificationOutput {
            query: self.query.clone(),
            query_type,
            top_k: dynamic_top_k(query_type, self.default_top_k),
            default_top_k: self.default_top_k,
        }
    }

    /// Write the classification through `formatter`
    pub fn report(&self, formatter: &mut OutputFormatter) -> Result<()> {
        let output = self.classify();

        if formatter.format() != OutputFormat::Pretty {
            return formatter.output(&output);
        }

        formatter.message("\nQuery Classification Results")?;
        formatter.message("============================")?;
        formatter.message(&format!("\nQuery:      {}", output.query))?;
        formatter.message(&format!("Query type: {}", output.query_type))?;
        formatter.message(&format!(
            "Top K:      {} (default {})",
            output.top_k, output.default_top_k
        ))
    }
}

impl CliCommand for ClassifyCommand {
    async fn execute(&self) -> Result<()> {
        self.report(&mut OutputFormatter::with_format(self.format, false))
    }

    fn name(&self) -> &'static str {
        "classify"
    }

    fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(ChunkwiseError::validation("Query cannot be empty"));
        }

        if self.default_top_k == 0 {
            return Err(ChunkwiseError::validation(
                "default_top_k must be greater than 0",
            ));
        }

        Ok(())
    }
}
