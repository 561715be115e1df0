//! CLI configuration module

use chunkwise_core::{ChunkwiseConfig, ChunkwiseError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "chunkwise.yaml";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Pretty,
    Compact,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChunkwiseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            _ => Err(ChunkwiseError::validation(format!(
                "Invalid output format: {}",
                s
            ))),
        }
    }
}

impl OutputFormat {
    /// Log format matching this output format
    pub fn log_format(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Compact => "compact",
            Self::Yaml | Self::Pretty => "pretty",
        }
    }
}

/// Resolve the configuration used by a CLI invocation
///
/// An explicit path must exist and validate. Without one, `chunkwise.yaml`
/// in `search_dir` is used when present, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>, search_dir: &Path) -> Result<ChunkwiseConfig> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ChunkwiseError::not_found(format!(
                    "Configuration file: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => {
            let candidate = search_dir.join(DEFAULT_CONFIG_FILE);
            candidate.exists().then_some(candidate)
        }
    };

    let config = match path {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            ChunkwiseConfig::from_file(&path)?
        }
        None => ChunkwiseConfig::default(),
    };

    config.validate()?;
    Ok(config)
}

/// Check if output supports colors
pub fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    atty::is(atty::Stream::Stdout)
}
