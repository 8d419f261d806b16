//! Core library for bakery waste tracking.
//!
//! This crate provides:
//! - Two-pass waste report extraction over noisy receipt OCR text and
//!   plain-text email bodies
//! - A three-stage, data-driven menu-item normalization pipeline
//! - Interfaces for the surrounding collaborators (document sources,
//!   record sinks, processed-id bookkeeping)

pub mod error;
pub mod models;
pub mod normalize;
pub mod report;
pub mod sink;
pub mod source;

pub use error::{CrumbError, Result, RuleError, SourceError, StoreError};
pub use models::{CrumbConfig, WasteRecord};
pub use normalize::{Normalizer, RuleSet};
pub use report::{
    ExtractionMode, ExtractionReport, ReportParser, SkipReason, WasteReportParser, parse_mdy,
};
pub use sink::{ProcessedLog, RecordSink};
pub use source::{Document, DocumentSource};
