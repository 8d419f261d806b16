//! File-backed document sources.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use glob::glob;
use tracing::debug;

use crumb_core::error::SourceError;
use crumb_core::source::{Document, DocumentSource};

/// Source that reads already-decoded text documents matching a glob
/// pattern, one document per file.
///
/// The file stem becomes the document id and the file's modification
/// date serves as the fallback date, standing in for the message
/// timestamp the mail fetcher would provide.
pub struct DirSource {
    pattern: String,
    location: Option<String>,
}

impl DirSource {
    /// All `.txt` files directly inside `dir`.
    pub fn new(dir: &Path, location: Option<String>) -> Self {
        Self::from_pattern(dir.join("*.txt").display().to_string(), location)
    }

    /// Files matching an explicit glob pattern.
    pub fn from_pattern(pattern: impl Into<String>, location: Option<String>) -> Self {
        Self {
            pattern: pattern.into(),
            location,
        }
    }
}

impl DocumentSource for DirSource {
    fn fetch(&mut self) -> Result<Vec<Document>, SourceError> {
        let mut paths: Vec<PathBuf> = glob(&self.pattern)
            .map_err(|e| SourceError::Invalid {
                id: self.pattern.clone(),
                reason: e.to_string(),
            })?
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        debug!(pattern = %self.pattern, files = paths.len(), "globbed documents");

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let text = std::fs::read_to_string(&path)?;
            let id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document")
                .to_string();

            documents.push(Document {
                id,
                location: self.location.clone(),
                text,
                fallback_date: modified_date(&path),
            });
        }

        Ok(documents)
    }
}

fn modified_date(path: &Path) -> Option<NaiveDate> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::<Local>::from(modified).date_naive())
}
