//! # Configuration
//!
//! Settings resolved from three layers, later layers winning:
//! 1. Built-in defaults
//! 2. A TOML file (`--config <PATH>` or the `FESTIVAL_CONFIG` environment variable)
//! 3. Command-line flags
//!
//! ```toml
//! comment_marker = "#"
//! reuse_policy = "lowest-id"    # or "earliest-released"
//! output = "text"               # or "json"
//! verify = false
//! ```

use festival_core::{FestivalError, ReusePolicy, primitives::COMMENT_MARKER};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "FESTIVAL_CONFIG";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix of input lines to skip.
    pub comment_marker: String,
    /// Which free stage is reused first.
    pub reuse_policy: ReusePolicy,
    /// Report format.
    pub output: OutputFormat,
    /// Re-check every schedule before printing it.
    pub verify: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            comment_marker: COMMENT_MARKER.to_string(),
            reuse_policy: ReusePolicy::default(),
            output: OutputFormat::default(),
            verify: false,
        }
    }
}

/// Overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub comment_marker: Option<String>,
    pub reuse_policy: Option<ReusePolicy>,
    pub json: bool,
    pub verify: bool,
}

impl Config {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, FestivalError> {
        toml::from_str(contents).map_err(|e| FestivalError::ConfigError(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self, FestivalError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            FestivalError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(FestivalError::InputTooLarge {
                size: metadata.len(),
                limit: MAX_CONFIG_FILE_SIZE,
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FestivalError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Locate and load the config file, if any.
    ///
    /// An explicit path wins over `FESTIVAL_CONFIG`; with neither, defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, FestivalError> {
        let path = explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var(CONFIG_ENV_VAR)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        });

        match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides on top of this config.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(marker) = overrides.comment_marker {
            self.comment_marker = marker;
        }
        if let Some(policy) = overrides.reuse_policy {
            self.reuse_policy = policy;
        }
        if overrides.json {
            self.output = OutputFormat::Json;
        }
        if overrides.verify {
            self.verify = true;
        }
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
