//! Configuration loading and management.
//!
//! The index is configured through [`IndexConfig`], which can be built in code or
//! loaded from TOML, YAML or JSON. [`IndexConfig::discover`] looks for a
//! `docsift.toml` in the current directory and its parents.

use crate::{DocsiftError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name searched for by [`IndexConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "docsift.toml";

/// Main index configuration.
///
/// # Example
///
/// ```rust
/// use docsift::IndexConfig;
///
/// let config = IndexConfig::default();
/// assert_eq!(config.search.max_results, 50);
/// assert_eq!(config.encodings[0], "utf-8");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Root directory that is scanned recursively
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// Ordered encoding labels tried when decoding plain text files
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,

    /// Cleaned text must be longer than this to be classified
    #[serde(default = "default_min_language_chars")]
    pub min_language_chars: usize,

    /// Per-file extraction budget in seconds (None = unbounded)
    #[serde(default)]
    pub extraction_timeout_secs: Option<u64>,

    /// Number of characters shown in scan previews
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Global cap on matches returned by one search
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Cap on occurrences collected from a single document
    #[serde(default = "default_max_matches_per_document")]
    pub max_matches_per_document: usize,

    /// Characters of context on each side of a match
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("./documents")
}

/// Default text decoding order, as WHATWG labels.
///
/// WHATWG maps `latin1` to windows-1252, so bytes 0x80-0x9F decode to
/// printable characters (0x80 is `€`) rather than C1 controls.
pub const DEFAULT_ENCODINGS: [&str; 5] = ["utf-8", "utf-16", "latin1", "shift_jis", "windows-31j"];

fn default_encodings() -> Vec<String> {
    DEFAULT_ENCODINGS
        .iter()
        .map(|label| label.to_string())
        .collect()
}
fn default_min_language_chars() -> usize {
    20
}
fn default_preview_chars() -> usize {
    200
}
fn default_max_results() -> usize {
    50
}
fn default_max_matches_per_document() -> usize {
    5
}
fn default_context_chars() -> usize {
    150
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            encodings: default_encodings(),
            min_language_chars: default_min_language_chars(),
            extraction_timeout_secs: None,
            preview_chars: default_preview_chars(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            max_matches_per_document: default_max_matches_per_document(),
            context_chars: default_context_chars(),
        }
    }
}

impl IndexConfig {
    /// Create a default configuration rooted at `documents_dir`.
    pub fn with_documents_dir(documents_dir: impl Into<PathBuf>) -> Self {
        Self {
            documents_dir: documents_dir.into(),
            ..Default::default()
        }
    }

    /// Per-file extraction timeout as a `Duration`.
    pub fn extraction_timeout(&self) -> Option<Duration> {
        self.extraction_timeout_secs.map(Duration::from_secs)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `DocsiftError::Validation` if the file cannot be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| DocsiftError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| DocsiftError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| DocsiftError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Self::from_toml_file(path),
            "yaml" | "yml" => Self::from_yaml_file(path),
            "json" => Self::from_json_file(path),
            _ => Err(DocsiftError::validation(format!(
                "Unsupported config file format: {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover `docsift.toml` in the current directory or any parent.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let current = std::env::current_dir().map_err(DocsiftError::Io)?;
        Self::discover_from(&current)
    }

    /// Discover `docsift.toml` starting from `start` and walking up.
    pub fn discover_from(start: &Path) -> Result<Option<Self>> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }
            current = dir.parent();
        }

        Ok(None)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DocsiftError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}
