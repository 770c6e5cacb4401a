//! Configuration system for yamlptr.
//!
//! This module provides the defaults the command-line tool uses when a flag
//! is not given. Configuration is stored as TOML and deserialized with serde;
//! missing fields fall back to their defaults.
//!
//! # Example
//!
//! ```
//! use yamlptr::config::{Config, Mode, OutputFormat};
//!
//! let config = Config::default();
//! assert_eq!(config.mode, Mode::First);
//! assert_eq!(config.format, OutputFormat::Text);
//!
//! let custom = Config {
//!     mode: Mode::All,
//!     ..Config::default()
//! };
//! assert_eq!(custom.document, 0);
//! ```

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which lookup policy to apply to a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// First match only; a missing path is an error
    #[default]
    First,
    /// Every match; a missing path prints nothing
    All,
    /// Every match; a missing path is an error
    Strict,
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `FILE:LINE:COLUMN: VALUE`, one per line
    #[default]
    Text,
    Json,
    Yaml,
}

/// Configuration for the yamlptr command-line tool.
///
/// * `mode` - Lookup policy (default: "first")
/// * `format` - Output format (default: "text")
/// * `document` - Index of the document to search in multi-document files (default: 0)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub document: usize,
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/yamlptr/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("yamlptr");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|err| {
                tracing::warn!("ignoring config file: {:#}", err);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Loads configuration from a specific file, reporting any failure.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file as pretty TOML.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}
