//! Init command implementation

use crate::commands::CliCommand;
use crate::config::DEFAULT_CONFIG_FILE;

use chunkwise_core::{ChunkwiseConfig, ChunkwiseError, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Write a default Chunkwise configuration file
#[derive(Debug, Clone, Args)]
pub struct InitCommand {
    /// Configuration file to create
    #[arg(long = "file", default_value = DEFAULT_CONFIG_FILE)]
    pub path: PathBuf,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

impl CliCommand for InitCommand {
    async fn execute(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        ChunkwiseConfig::default().to_file(&self.path)?;
        info!("Created configuration at {:?}", self.path);
        println!("✅ Wrote default configuration to {}", self.path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "init"
    }

    fn validate(&self) -> Result<()> {
        if self.path.exists() && !self.force {
            return Err(ChunkwiseError::validation(format!(
                "Configuration already exists: {} (use --force to overwrite)",
                self.path.display()
            )));
        }

        if self.path.is_dir() {
            return Err(ChunkwiseError::validation(format!(
                "Configuration path is a directory: {}",
                self.path.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::execute_command;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("conf").join("chunkwise.yaml");

        let cmd = InitCommand {
            path: path.clone(),
            force: false,
        };
        execute_command(cmd).await.unwrap();

        let config = ChunkwiseConfig::from_file(&path).unwrap();
        assert_eq!(config, ChunkwiseConfig::default());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chunkwise.yaml");
        std::fs::write(&path, "version: \"1.0\"\n").unwrap();

        let cmd = InitCommand {
            path: path.clone(),
            force: false,
        };
        let result = execute_command(cmd).await;
        assert!(matches!(result, Err(ChunkwiseError::Validation { .. })));

        let cmd = InitCommand { path, force: true };
        assert!(execute_command(cmd).await.is_ok());
    }
}
