//! Configuration loading from `.lsif-typed.toml`.
//!
//! Configuration is optional. Without a config file the converter runs with
//! default options, and command-line flags override whatever the file sets.
//!
//! # Example Configuration
//!
//! ```toml
//! [conversion]
//! implementation_results = "eager"
//! relationship_source = "declared"
//! tag_item_properties = true
//!
//! [output]
//! color = false
//! ```

use lsif_typed_core::ConversionOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".lsif-typed.toml";

/// Errors surfaced by [`CliConfig::load_strict`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration structure loaded from `.lsif-typed.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct CliConfig {
    /// Conversion policy, same fields as [`ConversionOptions`].
    #[serde(default)]
    pub conversion: ConversionOptions,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Output preferences.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Whether to color status messages. Auto-detected when unset.
    #[serde(default)]
    pub color: Option<bool>,
}

impl CliConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields defaults. Unreadable or malformed files are
    /// logged as warnings and also yield defaults.
    pub fn load(path: &Path) -> Self {
        match Self::load_strict(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Like [`CliConfig::load`], but a file that exists and cannot be used is
    /// an error.
    pub fn load_strict(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Whether colored output was configured, `None` for auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
