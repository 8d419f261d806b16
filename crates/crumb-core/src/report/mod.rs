//! Waste report extraction module.

mod dates;
mod parser;
pub mod patterns;

pub use dates::{DateScan, parse_mdy, scan_order_datetime};
pub use parser::{
    DATE_MARKER, Discard, ExtractionMode, ExtractionReport, SkipReason, WasteReportParser,
};

use chrono::NaiveDate;

use crate::models::WasteRecord;

/// Trait for waste report parsers.
///
/// Parsing is total: malformed input yields an empty or partial result,
/// never an error.
pub trait ReportParser {
    /// Scan a document, returning records plus the audit trail of
    /// discarded candidates.
    fn scan(&self, text: &str, fallback_date: Option<NaiveDate>) -> ExtractionReport;

    /// Extract just the records from a document.
    fn extract(&self, text: &str, fallback_date: Option<NaiveDate>) -> Vec<WasteRecord> {
        self.scan(text, fallback_date).records
    }
}
