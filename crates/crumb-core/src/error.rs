//! Error types for the crumb-core library.

use thiserror::Error;

/// Main error type for the crumb library.
#[derive(Error, Debug)]
pub enum CrumbError {
    /// Ruleset loading or compilation error.
    #[error("rule error: {0}")]
    Rule(#[from] RuleError),

    /// Record store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Document source error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the normalization ruleset.
///
/// Extraction and normalization themselves are total and never fail; the
/// only failure point is building a pipeline from bad rule data.
#[derive(Error, Debug)]
pub enum RuleError {
    /// A rule pattern did not compile.
    #[error("invalid pattern {pattern:?} in {stage} rules: {source}")]
    BadPattern {
        stage: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Failed to read a ruleset file.
    #[error("failed to read ruleset: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to decode a ruleset file.
    #[error("failed to decode ruleset: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors related to persisting extracted records.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error while appending or committing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode a record or log entry.
    #[error("failed to encode record: {0}")]
    Encode(String),
}

/// Errors related to fetching source documents.
#[derive(Error, Debug)]
pub enum SourceError {
    /// I/O error while reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be used.
    #[error("invalid document {id}: {reason}")]
    Invalid { id: String, reason: String },
}

/// Result type for the crumb library.
pub type Result<T> = std::result::Result<T, CrumbError>;
