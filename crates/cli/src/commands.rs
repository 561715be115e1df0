//! CLI commands module

use chunkwise_core::Result;

pub mod chunk;
pub mod classify;
pub mod clean;
pub mod init;
pub mod validate;

pub use chunk::*;
pub use classify::*;
pub use clean::*;
pub use init::*;
pub use validate::*;

/// Base trait for CLI commands
#[allow(async_fn_in_trait)]
pub trait CliCommand {
    /// Execute the command
    async fn execute(&self) -> Result<()>;

    /// Get command name for logging
    fn name(&self) -> &'static str;

    /// Validate command arguments
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Common command execution wrapper
pub async fn execute_command<T: CliCommand>(command: T) -> Result<()> {
    tracing::info!("Executing command: {}", command.name());

    command.validate()?;
    command.execute().await?;

    tracing::info!("Command {} completed successfully", command.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkwise_core::ChunkwiseError;

    struct TestCommand {
        valid: bool,
    }

    impl CliCommand for TestCommand {
        async fn execute(&self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "test"
        }

        fn validate(&self) -> Result<()> {
            if self.valid {
                Ok(())
            } else {
                Err(ChunkwiseError::validation("invalid test command"))
            }
        }
    }

    #[tokio::test]
    async fn test_execute_command() {
        let cmd = TestCommand { valid: true };
        assert!(execute_command(cmd).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_command_runs_validation_first() {
        let cmd = TestCommand { valid: false };
        let result = execute_command(cmd).await;
        assert!(matches!(result, Err(ChunkwiseError::Validation { .. })));
    }
}
