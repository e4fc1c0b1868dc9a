//! Configuration schema for claimcheck.
//!
//! Configuration is optional. Without a file every field takes its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::claims::HIGH_CONFIDENCE;

/// Default configuration file names, checked in the analyzed repository.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["claimcheck.yaml", ".claimcheck.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Glob patterns for paths to exclude (e.g., "**/vendor/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Extra glob patterns that identify documentation files
    #[serde(default)]
    pub doc_patterns: Vec<String>,
    /// Whether to extract claims from inline doc comments (default: true)
    #[serde(default)]
    pub inline_docs: Option<bool>,
    /// Confidence at or above which a claim counts as high confidence (default: 0.7)
    #[serde(default)]
    pub high_confidence_threshold: Option<f64>,
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the first default config file found under `root`, if any.
    pub fn discover<P: AsRef<Path>>(root: P) -> anyhow::Result<Option<Self>> {
        for name in DEFAULT_CONFIG_NAMES {
            let path = root.as_ref().join(name);
            if path.is_file() {
                return Self::parse_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// Returns whether inline doc comments are scanned (defaults to true).
    pub fn scan_inline_docs(&self) -> bool {
        self.inline_docs.unwrap_or(true)
    }

    /// Returns the high-confidence threshold (defaults to 0.7).
    pub fn high_confidence(&self) -> f64 {
        self.high_confidence_threshold.unwrap_or(HIGH_CONFIDENCE)
    }

    /// Check if a repository-relative path is excluded.
    /// Uses globset for matching, which supports `**` for recursive directory matching.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }
}

/// Validate a configuration for correctness.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if let Some(t) = config.high_confidence_threshold {
        if !(0.0..=1.0).contains(&t) {
            anyhow::bail!("invalid high_confidence_threshold {}, must be within [0, 1]", t);
        }
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    for pattern in &config.doc_patterns {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid doc_patterns pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}
