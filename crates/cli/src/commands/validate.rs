//! Validate command implementation

use crate::commands::CliCommand;
use crate::config::{supports_color, OutputFormat};
use crate::output::OutputFormatter;

use chunkwise_core::{ChunkwiseConfig, ChunkwiseError, Result};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Validate a Chunkwise configuration file
#[derive(Debug, Clone, Args)]
pub struct ValidateCommand {
    /// Configuration file to validate
    #[arg(value_name = "CONFIG")]
    pub path: PathBuf,

    /// Only show errors (suppress warnings)
    #[arg(long)]
    pub errors_only: bool,

    /// Format of the report
    #[arg(skip)]
    pub format: OutputFormat,
}

impl CliCommand for ValidateCommand {
    async fn execute(&self) -> Result<()> {
        let result = self.check().await;

        let mut formatter = OutputFormatter::with_format(self.format, supports_color());
        self.report(&result, &mut formatter)?;

        if result.has_errors() {
            return Err(ChunkwiseError::validation("Validation failed with errors"));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "validate"
    }

    fn validate(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(ChunkwiseError::not_found(format!(
                "Configuration file: {}",
                self.path.display()
            )));
        }

        Ok(())
    }
}

impl ValidateCommand {
    /// Report the result in `format`
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Load the configuration and collect every problem found
    pub async fn check(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                result.add_error("file", format!("Failed to read config file: {}", e));
                return result;
            }
        };

        let config: ChunkwiseConfig = match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(yaml_error) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(_) => {
                    result.add_error("syntax", format!("Invalid configuration: {}", yaml_error));
                    return result;
                }
            },
        };

        if let Err(e) = config.chunking.to_options().validate() {
            result.add_error("chunking", e.to_string());
        }

        if let Err(e) = config.validate() {
            if !matches!(e, ChunkwiseError::Chunking(_)) {
                result.add_error("config", e.to_string());
            }
        }

        if config.chunking.overlap_size >= config.chunking.chunk_size {
            result.add_warning(
                "chunking",
                format!(
                    "overlap_size ({}) is not smaller than chunk_size ({})",
                    config.chunking.overlap_size, config.chunking.chunk_size
                ),
            );
        }

        if config.retrieval.default_top_k == 0 {
            result.add_warning(
                "retrieval",
                "default_top_k is 0, the built-in default of 3 applies".to_string(),
            );
        }

        if config.retrieval.similarity_threshold == 0.0 {
            result.add_warning(
                "retrieval",
                "similarity_threshold is 0.0, the built-in default of 0.35 applies".to_string(),
            );
        }

        result
    }

    /// Write `result` through `formatter`
    pub fn report(
        &self,
        result: &ValidationResult,
        formatter: &mut OutputFormatter,
    ) -> Result<()> {
        if formatter.format() != OutputFormat::Pretty {
            if self.errors_only {
                let errors = ValidationResult {
                    errors: result.errors.clone(),
                    warnings: BTreeMap::new(),
                };
                return formatter.output(&errors);
            }
            return formatter.output(result);
        }

        for (category, messages) in &result.errors {
            for message in messages {
                formatter.error(&format!("[{}] {}", category, message))?;
            }
        }

        if !self.errors_only {
            for (category, messages) in &result.warnings {
                for message in messages {
                    formatter.warning(&format!("[{}] {}", category, message))?;
                }
            }
        }

        if !result.has_errors() {
            formatter.success(&format!(
                "Configuration is valid: {}",
                self.path.display()
            ))?;
        }

        Ok(())
    }
}

/// Problems found in a configuration file, grouped by category
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub errors: BTreeMap<String, Vec<String>>,
    pub warnings: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, category: &str, message: String) {
        self.errors
            .entry(category.to_string())
            .or_default()
            .push(message);
    }

    pub fn add_warning(&mut self, category: &str, message: String) {
        self.warnings
            .entry(category.to_string())
            .or_default()
            .push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::SharedBuffer;
    use tempfile::TempDir;

    fn command(path: PathBuf) -> ValidateCommand {
        ValidateCommand {
            path,
            errors_only: false,
            format: OutputFormat::Pretty,
        }
    }

    fn sample_result() -> ValidationResult {
        let mut result = ValidationResult::new();
        result.add_error("chunking", "chunk_size must be positive".to_string());
        result.add_warning("retrieval", "default_top_k is 0".to_string());
        result
    }

    #[test]
    fn test_pretty_report_marks_messages() {
        let buffer = SharedBuffer::default();
        let mut formatter =
            OutputFormatter::with_writer(OutputFormat::Pretty, false, buffer.clone());

        let cmd = command(PathBuf::from("chunkwise.yaml"));
        cmd.report(&sample_result(), &mut formatter).unwrap();

        let output = buffer.contents();
        assert!(output.contains("✗ [chunking] chunk_size must be positive"));
        assert!(output.contains("⚠ [retrieval] default_top_k is 0"));
        assert!(!output.contains("Configuration is valid"));

        let buffer = SharedBuffer::default();
        let mut formatter =
            OutputFormatter::with_writer(OutputFormat::Pretty, false, buffer.clone());
        cmd.report(&ValidationResult::new(), &mut formatter).unwrap();
        assert!(buffer
            .contents()
            .contains("✓ Configuration is valid: chunkwise.yaml"));
    }

    #[test]
    fn test_json_report_honors_errors_only() {
        let buffer = SharedBuffer::default();
        let mut formatter =
            OutputFormatter::with_writer(OutputFormat::Json, false, buffer.clone());

        let mut cmd = command(PathBuf::from("chunkwise.yaml")).with_format(OutputFormat::Json);
        cmd.errors_only = true;
        cmd.report(&sample_result(), &mut formatter).unwrap();

        let json: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(json["errors"]["chunking"][0], "chunk_size must be positive");
        assert!(json["warnings"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_validate_missing_file() {
        let cmd = command(PathBuf::from("/nonexistent/chunkwise.yaml"));
        assert!(matches!(
            cmd.validate(),
            Err(ChunkwiseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_default_config_is_valid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chunkwise.yaml");
        ChunkwiseConfig::default().to_file(&path).unwrap();

        let result = command(path.clone()).check().await;
        assert!(!result.has_errors());
        assert!(result.warnings.is_empty());
        assert!(command(path).execute().await.is_ok());
    }

    #[tokio::test]
    async fn test_zero_chunk_size_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        std::fs::write(&path, "chunking:\n  chunk_size: 0\n  overlap_size: 0\n").unwrap();

        let result = command(path.clone()).check().await;
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors["chunking"][0].contains("chunk_size"));

        let outcome = command(path).execute().await;
        assert!(matches!(outcome, Err(ChunkwiseError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_large_overlap_is_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("overlap.json");
        std::fs::write(
            &path,
            r#"{"chunking": {"chunk_size": 100, "overlap_size": 150}}"#,
        )
        .unwrap();

        let result = command(path).check().await;
        assert!(!result.has_errors());
        assert_eq!(result.warnings["chunking"].len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_file_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        std::fs::write(&path, "chunking: [unclosed").unwrap();

        let result = command(path).check().await;
        assert!(result.errors.contains_key("syntax"));
    }
}
