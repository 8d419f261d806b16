//! File-backed record sinks.

use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crumb_core::error::StoreError;
use crumb_core::models::WasteRecord;
use crumb_core::sink::{ProcessedLog, RecordSink};

/// Append-only CSV store for waste records.
///
/// Column layout matches the downstream sheet: date, location, menu item,
/// waste count. The header row is written once when the file is created.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Open `path` for appending, creating it (with header) if needed.
    pub fn append_to(path: &Path) -> Result<Self, StoreError> {
        let needs_header = match std::fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record(["date", "location", "menu item", "waste count"])
                .map_err(encode)?;
        }

        Ok(Self { writer })
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, location: &str, records: &[WasteRecord]) -> Result<(), StoreError> {
        for record in records {
            self.writer
                .write_record([
                    record.date_string().as_str(),
                    location,
                    record.item.as_str(),
                    record.count.to_string().as_str(),
                ])
                .map_err(encode)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.writer.flush()?;
        Ok(())
    }
}

fn encode(err: csv::Error) -> StoreError {
    StoreError::Encode(err.to_string())
}

/// Processed-document bookkeeping as a JSON id array on disk.
pub struct JsonProcessedLog {
    path: PathBuf,
    ids: BTreeSet<String>,
    dirty: bool,
}

impl JsonProcessedLog {
    /// Load the log from `path`; a missing file is an empty log.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let ids = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| StoreError::Encode(e.to_string()))?
        } else {
            BTreeSet::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            ids,
            dirty: false,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl ProcessedLog for JsonProcessedLog {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    fn mark(&mut self, id: &str) {
        if self.ids.insert(id.to_string()) {
            self.dirty = true;
        }
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        let content =
            serde_json::to_string_pretty(&self.ids).map_err(|e| StoreError::Encode(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        self.dirty = false;
        Ok(())
    }
}
