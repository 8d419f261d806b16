//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::RuleError;
use crate::normalize::RuleSet;

/// Main configuration for the crumb pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrumbConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Normalization ruleset configuration.
    pub rules: RulesConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fall back to section-based scanning when the inline receipt
    /// pattern produces nothing.
    pub section_fallback: bool,

    /// Literal marker identifying receipt lines that carry the order
    /// timestamp.
    pub date_marker: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            section_fallback: true,
            date_marker: "Ordered:".to_string(),
        }
    }
}

/// Normalization ruleset configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Path to an external ruleset file. When unset, the built-in
    /// catalog is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ruleset_file: Option<PathBuf>,
}

/// Record store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Append-only CSV file holding extracted records.
    pub records_file: PathBuf,

    /// JSON file holding ids of already-processed documents.
    pub processed_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            records_file: PathBuf::from("waste.csv"),
            processed_file: PathBuf::from("processed.json"),
        }
    }
}

impl CrumbConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// Resolve the active ruleset: the configured file if set, otherwise
    /// the built-in catalog.
    pub fn load_ruleset(&self) -> Result<RuleSet, RuleError> {
        match &self.rules.ruleset_file {
            Some(path) => RuleSet::from_file(path),
            None => Ok(RuleSet::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrumbConfig::default();
        assert!(config.extraction.section_fallback);
        assert_eq!(config.extraction.date_marker, "Ordered:");
        assert!(config.rules.ruleset_file.is_none());
        assert_eq!(config.store.records_file, PathBuf::from("waste.csv"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CrumbConfig =
            serde_json::from_str(r#"{"extraction":{"section_fallback":false}}"#).unwrap();
        assert!(!config.extraction.section_fallback);
        assert_eq!(config.extraction.date_marker, "Ordered:");
    }
}
