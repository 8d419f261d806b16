//! Two-pass waste report parser.
//!
//! Pass 1 handles photographed point-of-sale receipts: an `Ordered:` line
//! carries the order timestamp, and waste entries appear inline as
//! `<count> Wasted <item>`. Pass 2 handles plain-text email bodies: a
//! waste section header followed by `<item>: <count>` lines. Pass 1 wins
//! when it is productive; pass 2 runs only when pass 1 found nothing.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, trace, warn};

use super::ReportParser;
use super::dates::{DateScan, scan_order_datetime};
use super::patterns::{COUNT_TOKEN, WASTE_LINE};
use crate::error::RuleError;
use crate::models::WasteRecord;
use crate::normalize::{Normalizer, RuleSet};

/// Default marker for receipt lines carrying the order timestamp.
pub const DATE_MARKER: &str = "Ordered:";

/// The extraction strategy that produced a document's records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// Inline `<count> Wasted <item>` receipt lines.
    InlinePattern,
    /// `<item>: <count>` lines under a waste section header.
    SectionBased,
}

/// Why a candidate produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A timestamp-shaped substring failed to parse; the running date is
    /// unset until the next valid `Ordered:` line.
    DateParse,
    /// A candidate matched but no date was available for it.
    NoDate,
    /// The count token was not a plain digit run.
    MalformedCount,
    /// The item name normalized to nothing.
    EmptyAfterNormalization,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::DateParse => "date parse failure",
            SkipReason::NoDate => "no date available",
            SkipReason::MalformedCount => "malformed count token",
            SkipReason::EmptyAfterNormalization => "empty after normalization",
        };
        f.write_str(s)
    }
}

/// A discarded candidate, kept so callers can audit rejected lines.
#[derive(Debug, Clone, Serialize)]
pub struct Discard {
    /// 1-based source line, absent for document-level discards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// The offending source text.
    pub source: String,

    /// Why the candidate was dropped.
    pub reason: SkipReason,
}

impl Discard {
    fn at_line(line: usize, source: &str, reason: SkipReason) -> Self {
        Self {
            line: Some(line),
            source: source.to_string(),
            reason,
        }
    }

    fn document(reason: SkipReason) -> Self {
        Self {
            line: None,
            source: String::new(),
            reason,
        }
    }
}

/// Result of scanning one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Records in source-line order.
    pub records: Vec<WasteRecord>,

    /// The strategy that produced the records; `None` when no strategy
    /// was productive.
    pub mode: Option<ExtractionMode>,

    /// Candidates that were dropped, with reasons.
    pub discards: Vec<Discard>,
}

impl ExtractionReport {
    fn empty(discards: Vec<Discard>) -> Self {
        Self {
            records: Vec::new(),
            mode: None,
            discards,
        }
    }
}

/// Two-pass parser over a compiled normalization pipeline.
pub struct WasteReportParser {
    normalizer: Normalizer,
    section_headers: Vec<String>,
    date_marker: String,
    section_fallback: bool,
}

impl WasteReportParser {
    /// Build a parser from a ruleset.
    pub fn from_rules(rules: &RuleSet) -> Result<Self, RuleError> {
        Ok(Self {
            normalizer: Normalizer::new(rules)?,
            section_headers: rules.section_headers.clone(),
            date_marker: DATE_MARKER.to_string(),
            section_fallback: true,
        })
    }

    /// Parser over the built-in catalog.
    pub fn builtin() -> Self {
        Self::from_rules(&RuleSet::builtin()).expect("built-in ruleset compiles")
    }

    /// Override the order-timestamp marker.
    pub fn with_date_marker(mut self, marker: impl Into<String>) -> Self {
        self.date_marker = marker.into();
        self
    }

    /// Enable or disable the section-based second pass.
    pub fn with_section_fallback(mut self, enabled: bool) -> Self {
        self.section_fallback = enabled;
        self
    }

    /// The parser's normalization pipeline.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Pass 1: scan for inline receipt entries, tracking the running
    /// order date as it changes.
    fn inline_scan(&self, text: &str) -> InlinePass {
        let mut records = Vec::new();
        let mut discards = Vec::new();
        let mut date: Option<NaiveDate> = None;

        for (idx, line) in text.lines().enumerate() {
            let lineno = idx + 1;

            if line.contains(&self.date_marker) {
                match scan_order_datetime(line) {
                    DateScan::Found(found) => {
                        trace!(line = lineno, date = %found, "order date updated");
                        date = Some(found);
                    }
                    DateScan::Invalid => {
                        date = None;
                        discards.push(Discard::at_line(lineno, line, SkipReason::DateParse));
                    }
                    DateScan::NotFound => {}
                }
            }

            let Some(caps) = WASTE_LINE.captures(line) else {
                continue;
            };
            let Some(current) = date else {
                discards.push(Discard::at_line(lineno, line, SkipReason::NoDate));
                continue;
            };
            let count: u32 = match caps[1].parse() {
                Ok(count) => count,
                Err(_) => {
                    discards.push(Discard::at_line(lineno, line, SkipReason::MalformedCount));
                    continue;
                }
            };

            let item = self.normalizer.normalize(caps[2].trim());
            if item.chars().count() > 1 {
                records.push(WasteRecord::new(current, item, count));
            } else {
                discards.push(Discard::at_line(
                    lineno,
                    line,
                    SkipReason::EmptyAfterNormalization,
                ));
            }
        }

        InlinePass {
            records,
            date,
            discards,
        }
    }

    /// Pass 2: scan for `<item>: <count>` lines inside a waste section.
    /// The section runs to end of document; there is no terminator.
    fn section_scan(
        &self,
        text: &str,
        date: NaiveDate,
        discards: &mut Vec<Discard>,
    ) -> Vec<WasteRecord> {
        let mut records = Vec::new();
        let mut in_section = false;

        for (idx, raw_line) in text.lines().enumerate() {
            let lineno = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if self.is_section_header(line) {
                trace!(line = lineno, "waste section header");
                in_section = true;
                continue;
            }
            if !in_section {
                continue;
            }

            // Section text without a colon is prose, not data.
            let Some((item, count)) = line.split_once(':') else {
                trace!(line = lineno, "skipping colon-less section line");
                continue;
            };

            let count = count.trim();
            if !COUNT_TOKEN.is_match(count) {
                discards.push(Discard::at_line(lineno, line, SkipReason::MalformedCount));
                continue;
            }
            let count: u32 = match count.parse() {
                Ok(count) => count,
                Err(_) => {
                    discards.push(Discard::at_line(lineno, line, SkipReason::MalformedCount));
                    continue;
                }
            };

            let item = self.normalizer.normalize(item.trim());
            if item.chars().count() > 1 {
                records.push(WasteRecord::new(date, item, count));
            } else {
                discards.push(Discard::at_line(
                    lineno,
                    line,
                    SkipReason::EmptyAfterNormalization,
                ));
            }
        }

        records
    }

    /// Check for a waste section header in its various renderings:
    /// markdown emphasis is stripped, the match is case-insensitive, and
    /// a trailing colon is allowed.
    fn is_section_header(&self, line: &str) -> bool {
        let cleaned: String = line
            .trim()
            .chars()
            .filter(|c| !matches!(c, '*' | '_' | '#'))
            .collect();
        let candidate = cleaned.strip_suffix(':').unwrap_or(&cleaned);

        self.section_headers
            .iter()
            .any(|header| candidate.eq_ignore_ascii_case(header))
    }
}

impl ReportParser for WasteReportParser {
    fn scan(&self, text: &str, fallback_date: Option<NaiveDate>) -> ExtractionReport {
        let mut pass = self.inline_scan(text);

        if !pass.records.is_empty() {
            debug!(
                records = pass.records.len(),
                "inline receipt pattern was productive"
            );
            return ExtractionReport {
                records: pass.records,
                mode: Some(ExtractionMode::InlinePattern),
                discards: pass.discards,
            };
        }

        if !self.section_fallback {
            return ExtractionReport::empty(pass.discards);
        }

        // No record can exist without a date.
        let Some(date) = pass.date.or(fallback_date) else {
            warn!("no date available for document");
            pass.discards.push(Discard::document(SkipReason::NoDate));
            return ExtractionReport::empty(pass.discards);
        };

        debug!(date = %date, "falling back to section-based scan");
        let records = self.section_scan(text, date, &mut pass.discards);
        let mode = if records.is_empty() {
            None
        } else {
            Some(ExtractionMode::SectionBased)
        };

        ExtractionReport {
            records,
            mode,
            discards: pass.discards,
        }
    }
}

struct InlinePass {
    records: Vec<WasteRecord>,
    date: Option<NaiveDate>,
    discards: Vec<Discard>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parser() -> WasteReportParser {
        WasteReportParser::builtin()
    }

    fn mdy(s: &str) -> NaiveDate {
        super::super::parse_mdy(s).unwrap()
    }

    #[test]
    fn test_inline_receipt() {
        let records = parser().extract("Ordered: 03/14/24 10:30 AM\n2 Wasted Bluberry Muffin", None);

        assert_eq!(
            records,
            vec![WasteRecord::new(mdy("03/14/2024"), "Blueberry Muffin", 2)]
        );
    }

    #[test]
    fn test_inline_date_persists_across_lines() {
        let text = "Take Out\n\
                    Ordered: 03/14/24 10:30 AM\n\
                    1 Blueberry Muffin $4.25\n\
                    2 Wasted Croissantf\n\
                    Subtotal $4.25\n\
                    3 Wasted Banana Bread";
        let records = parser().extract(text, None);

        assert_eq!(
            records,
            vec![
                WasteRecord::new(mdy("03/14/2024"), "Croissant", 2),
                WasteRecord::new(mdy("03/14/2024"), "Banana Bread", 3),
            ]
        );
    }

    #[test]
    fn test_inline_without_date_yields_nothing() {
        let report = parser().scan("2 Wasted Croissant", None);

        assert!(report.records.is_empty());
        assert!(report.mode.is_none());
        // Both the dateless candidate and the document itself are audited.
        assert!(
            report
                .discards
                .iter()
                .any(|d| d.reason == SkipReason::NoDate && d.line == Some(1))
        );
    }

    #[test]
    fn test_section_with_fallback_date() {
        let records = parser().extract(
            "WASTE:\nCroissantf: 5\nBanana Bread: 3",
            Some(mdy("01/01/2025")),
        );

        assert_eq!(
            records,
            vec![
                WasteRecord::new(mdy("01/01/2025"), "Croissant", 5),
                WasteRecord::new(mdy("01/01/2025"), "Banana Bread", 3),
            ]
        );
    }

    #[test]
    fn test_markdown_header_equivalence() {
        let p = parser();
        let fallback = Some(mdy("01/01/2025"));

        let plain = p.extract("WASTE REPORT:\nScon: 2", fallback);
        let markdown = p.extract("**Waste Report**\nScon: 2", fallback);

        assert_eq!(plain, markdown);
        assert_eq!(plain, vec![WasteRecord::new(mdy("01/01/2025"), "Scone", 2)]);
    }

    #[test]
    fn test_section_skips_prose_and_bad_counts() {
        let text = "Hi team,\n\
                    WASTE\n\
                    please log carefully\n\
                    Croissant: five\n\
                    Quiche: 4\n\
                    thanks everyone";
        let report = parser().scan(text, Some(mdy("06/30/2025")));

        assert_eq!(
            report.records,
            vec![WasteRecord::new(mdy("06/30/2025"), "Quiche", 4)]
        );
        assert_eq!(report.mode, Some(ExtractionMode::SectionBased));
        assert!(
            report
                .discards
                .iter()
                .any(|d| d.reason == SkipReason::MalformedCount && d.source.contains("five"))
        );
    }

    #[test]
    fn test_lines_before_header_ignored() {
        let records = parser().extract(
            "Croissant: 9\nWASTE ITEMS\nBaguette: 2",
            Some(mdy("06/30/2025")),
        );

        assert_eq!(
            records,
            vec![WasteRecord::new(mdy("06/30/2025"), "Baguette", 2)]
        );
    }

    #[test]
    fn test_inline_date_feeds_section_pass() {
        // The receipt timestamp parsed in pass 1 is reused by pass 2 even
        // when no fallback date is supplied.
        let text = "Ordered: 05/02/25 8:15 AM\nWASTED:\nLevain.00: 4";
        let records = parser().extract(text, None);

        assert_eq!(records, vec![WasteRecord::new(mdy("05/02/2025"), "Levain", 4)]);
    }

    #[test]
    fn test_no_date_anywhere_is_empty_not_an_error() {
        let report = parser().scan("WASTE:\nCroissant: 5", None);

        assert!(report.records.is_empty());
        assert!(report.mode.is_none());
        assert!(
            report
                .discards
                .iter()
                .any(|d| d.reason == SkipReason::NoDate && d.line.is_none())
        );
    }

    #[test]
    fn test_invalid_timestamp_unsets_date() {
        let text = "Ordered: 03/14/24 10:30 AM\n\
                    Ordered: 99/99/99 10:30 AM\n\
                    2 Wasted Croissant";
        let report = parser().scan(text, None);

        assert!(report.records.is_empty());
        assert!(
            report
                .discards
                .iter()
                .any(|d| d.reason == SkipReason::DateParse && d.line == Some(2))
        );
    }

    #[test]
    fn test_inline_wins_over_section() {
        let text = "Ordered: 03/14/24 10:30 AM\n\
                    1 Wasted Croissant\n\
                    WASTE:\n\
                    Baguette: 7";
        let report = parser().scan(text, None);

        assert_eq!(report.mode, Some(ExtractionMode::InlinePattern));
        assert_eq!(
            report.records,
            vec![WasteRecord::new(mdy("03/14/2024"), "Croissant", 1)]
        );
    }

    #[test]
    fn test_section_fallback_can_be_disabled() {
        let p = parser().with_section_fallback(false);
        let records = p.extract("WASTE:\nCroissant: 5", Some(mdy("01/01/2025")));

        assert!(records.is_empty());
    }

    #[test]
    fn test_unnormalizable_items_are_discarded() {
        let text = "Ordered: 03/14/24 10:30 AM\n3 Wasted 1234";
        let report = parser().scan(text, None);

        assert!(report.records.is_empty());
        assert!(
            report
                .discards
                .iter()
                .any(|d| d.reason == SkipReason::EmptyAfterNormalization)
        );
    }

    #[test]
    fn test_custom_date_marker() {
        let p = parser().with_date_marker("Placed:");
        let records = p.extract("Placed: 03/14/24 10:30 AM\n2 Wasted Croissant", None);

        assert_eq!(
            records,
            vec![WasteRecord::new(mdy("03/14/2024"), "Croissant", 2)]
        );
    }

    #[test]
    fn test_empty_document() {
        let report = parser().scan("", None);

        assert!(report.records.is_empty());
        assert!(report.mode.is_none());
    }
}
