//! Data models for waste records and pipeline configuration.

pub mod config;
pub mod record;

pub use config::{CrumbConfig, ExtractionConfig, RulesConfig, StoreConfig};
pub use record::WasteRecord;
