//! Document sources.
//!
//! Retrieval itself (mailbox access, attachment decoding, OCR) lives
//! outside the core; a source only has to deliver decoded text together
//! with a fallback date and an id the processed-log can key on.

use chrono::NaiveDate;

use crate::error::SourceError;

/// One unit of input: the decoded text of a receipt photo or an email
/// body, plus the metadata the extractor and the stores need.
#[derive(Debug, Clone)]
pub struct Document {
    /// Stable id used for already-processed bookkeeping.
    pub id: String,

    /// Where the report came from (sender location). Grouped on by
    /// downstream reporting.
    pub location: Option<String>,

    /// Decoded document text.
    pub text: String,

    /// Date to use when the text itself carries none, already in
    /// canonical `MM/DD/YYYY` meaning (e.g. the message timestamp).
    pub fallback_date: Option<NaiveDate>,
}

/// Trait for document providers.
pub trait DocumentSource {
    /// Fetch the next batch of documents.
    fn fetch(&mut self) -> Result<Vec<Document>, SourceError>;
}
