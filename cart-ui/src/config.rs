//! Settings for the cart manager.
//!
//! Values come from three layers: command-line flags, an optional TOML
//! config file, and built-in defaults. Flags win over the file, the file
//! wins over the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BACKEND: &str = "sqlite";
pub const DEFAULT_DATABASE: &str = "cart.db";

/// One layer of optional settings. Parsed from `cart.toml`, and also used
/// to carry command-line overrides, so layers merge with a single rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Database backend name (e.g. `"sqlite"`).
    pub backend: Option<String>,
    /// Connection string for the backend.
    pub database: Option<String>,
    /// When set, log records are appended to this file.
    pub log_file: Option<PathBuf>,
    /// Log filter directive (e.g. `"debug"` or `"cart_core=trace"`).
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse config file")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Merges `other` underneath `self`: fields present in `self` win.
    pub fn or(self, other: FileConfig) -> FileConfig {
        FileConfig {
            backend: self.backend.or(other.backend),
            database: self.database.or(other.database),
            log_file: self.log_file.or(other.log_file),
            log_level: self.log_level.or(other.log_level),
        }
    }
}

/// Final settings after merging every layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub backend: String,
    pub database: String,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Settings {
    /// Resolves command-line overrides against the config file and the
    /// built-in defaults. Logging stays off unless a layer asks for it.
    pub fn from_layers(overrides: FileConfig, file: FileConfig) -> Self {
        let merged = overrides.or(file);
        Settings {
            backend: merged.backend.unwrap_or_else(|| DEFAULT_BACKEND.to_string()),
            database: merged
                .database
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            log_file: merged.log_file,
            log_level: merged.log_level,
        }
    }
}
