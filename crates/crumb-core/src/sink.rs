//! Record persistence interfaces.
//!
//! Storage format, aggregation and deduplication across runs belong to
//! the collaborators behind these traits; the core only promises records
//! in source-line order.

use crate::error::StoreError;
use crate::models::WasteRecord;

/// An append-only destination for extracted records.
pub trait RecordSink {
    /// Append records extracted from one document.
    fn append(&mut self, location: &str, records: &[WasteRecord]) -> Result<(), StoreError>;

    /// Flush buffered rows.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Bookkeeping of already-processed document ids, so reruns skip
/// documents they have seen.
pub trait ProcessedLog {
    /// Whether a document id was already processed.
    fn contains(&self, id: &str) -> bool;

    /// Mark a document id as processed.
    fn mark(&mut self, id: &str);

    /// Persist the log.
    fn commit(&mut self) -> Result<(), StoreError>;
}
