//! Data-driven normalization ruleset.
//!
//! The rule tables are configuration, not code: they encode a single
//! business's evolving product catalog and observed OCR error patterns,
//! so they can be edited and versioned without touching the pipeline.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::catalog;
use crate::error::RuleError;

/// A single ordered `(pattern, replacement)` rewrite.
///
/// Patterns use `regex` crate syntax; replacements may reference capture
/// groups (`$1`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rewrite {
    pub pattern: String,
    pub replace: String,
}

impl Rewrite {
    pub fn new(pattern: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replace: replace.into(),
        }
    }
}

/// One vocabulary substitution: a known OCR-garbled token or phrase and
/// its canonical spelling. Matched whole-word and case-insensitively, so
/// the key must cover a complete token or phrase, never a substring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabEntry {
    pub from: String,
    pub to: String,
}

impl VocabEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// The complete, ordered rule catalog for one product vocabulary.
///
/// Order within each table is a semantic contract: later cleanup patterns
/// assume earlier ones already collapsed whitespace and punctuation runs,
/// and vocabulary entries feed each other in sequence. Reordering can
/// silently change output on edge-case inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Stage 1 rewrites: strip OCR noise and receipt artifacts.
    pub cleanup: Vec<Rewrite>,

    /// Stage 2a: whole-word garbled-spelling corrections.
    pub vocabulary: Vec<VocabEntry>,

    /// Stage 2b: multi-token product-name phrase rewrites.
    pub phrases: Vec<Rewrite>,

    /// Stage 3 rewrites: final trailing-noise removal.
    pub post_clean: Vec<Rewrite>,

    /// Tokens always rendered fully upper-case during standardization.
    pub abbreviations: Vec<String>,

    /// Waste section header phrases recognized by the extractor.
    pub section_headers: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleSet {
    /// The built-in catalog shipped with the crate.
    pub fn builtin() -> Self {
        fn rewrites(table: &[(&str, &str)]) -> Vec<Rewrite> {
            table.iter().map(|(p, r)| Rewrite::new(*p, *r)).collect()
        }

        Self {
            cleanup: rewrites(catalog::CLEANUP),
            vocabulary: catalog::VOCABULARY
                .iter()
                .map(|(f, t)| VocabEntry::new(*f, *t))
                .collect(),
            phrases: rewrites(catalog::PHRASES),
            post_clean: rewrites(catalog::POST_CLEAN),
            abbreviations: catalog::ABBREVIATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            section_headers: catalog::SECTION_HEADERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// An empty ruleset. Useful as a starting point for synthetic test
    /// catalogs; an empty pipeline passes every name through unchanged
    /// (modulo token casing).
    pub fn empty() -> Self {
        Self {
            cleanup: Vec::new(),
            vocabulary: Vec::new(),
            phrases: Vec::new(),
            post_clean: Vec::new(),
            abbreviations: Vec::new(),
            section_headers: Vec::new(),
        }
    }

    /// Load a ruleset from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, RuleError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the ruleset to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), RuleError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Total number of rules across all tables.
    pub fn rule_count(&self) -> usize {
        self.cleanup.len()
            + self.vocabulary.len()
            + self.phrases.len()
            + self.post_clean.len()
    }
}

/// A rewrite with its pattern compiled.
#[derive(Debug)]
pub(crate) struct CompiledRewrite {
    pub regex: Regex,
    pub replace: String,
}

pub(crate) fn compile_rewrites(
    stage: &'static str,
    rules: &[Rewrite],
) -> Result<Vec<CompiledRewrite>, RuleError> {
    rules
        .iter()
        .map(|rule| {
            let regex = Regex::new(&rule.pattern).map_err(|source| RuleError::BadPattern {
                stage,
                pattern: rule.pattern.clone(),
                source,
            })?;
            Ok(CompiledRewrite {
                regex,
                replace: rule.replace.clone(),
            })
        })
        .collect()
}

/// Vocabulary entries compile to whole-word, case-insensitive patterns.
/// Keys are escaped, so `Levain.00` matches the literal dot.
pub(crate) fn compile_vocabulary(
    entries: &[VocabEntry],
) -> Result<Vec<CompiledRewrite>, RuleError> {
    entries
        .iter()
        .map(|entry| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&entry.from));
            let regex = Regex::new(&pattern).map_err(|source| RuleError::BadPattern {
                stage: "vocabulary",
                pattern: entry.from.clone(),
                source,
            })?;
            Ok(CompiledRewrite {
                regex,
                replace: entry.to.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_compiles() {
        let rules = RuleSet::builtin();
        assert!(compile_rewrites("cleanup", &rules.cleanup).is_ok());
        assert!(compile_vocabulary(&rules.vocabulary).is_ok());
        assert!(compile_rewrites("phrases", &rules.phrases).is_ok());
        assert!(compile_rewrites("post_clean", &rules.post_clean).is_ok());
        assert!(rules.rule_count() > 90);
    }

    #[test]
    fn test_bad_pattern_is_an_error() {
        let rules = vec![Rewrite::new(r"[unclosed", "")];
        let err = compile_rewrites("cleanup", &rules).unwrap_err();
        match err {
            RuleError::BadPattern { stage, pattern, .. } => {
                assert_eq!(stage, "cleanup");
                assert_eq!(pattern, "[unclosed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let rules = RuleSet::builtin();
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cleanup.len(), rules.cleanup.len());
        assert_eq!(back.vocabulary.len(), rules.vocabulary.len());
        assert_eq!(back.section_headers, rules.section_headers);
    }

    #[test]
    fn test_missing_tables_default_to_builtin() {
        // A partial file overrides only the tables it names.
        let rules: RuleSet = serde_json::from_str(r#"{"abbreviations":["QA"]}"#).unwrap();
        assert_eq!(rules.abbreviations, vec!["QA".to_string()]);
        assert!(!rules.cleanup.is_empty());
    }
}
