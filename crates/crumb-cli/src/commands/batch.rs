//! Batch command - process a directory of documents into the record store.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crumb_core::report::{ReportParser, WasteReportParser};
use crumb_core::sink::{ProcessedLog, RecordSink};
use crumb_core::source::DocumentSource;

use super::load_config;
use crate::sinks::{CsvSink, JsonProcessedLog};
use crate::sources::DirSource;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory or glob pattern of text documents
    #[arg(required = true)]
    input: String,

    /// Location label recorded with every document in this batch
    #[arg(short, long, default_value = "Unknown")]
    location: String,

    /// Record store CSV file (default from config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Processed-id log file (default from config)
    #[arg(long)]
    processed: Option<PathBuf>,

    /// Process documents whose ids are already in the log
    #[arg(long)]
    reprocess: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut source = if std::path::Path::new(&args.input).is_dir() {
        DirSource::new(std::path::Path::new(&args.input), Some(args.location.clone()))
    } else {
        DirSource::from_pattern(args.input.clone(), Some(args.location.clone()))
    };

    let documents = source.fetch()?;
    if documents.is_empty() {
        anyhow::bail!("No matching documents found for: {}", args.input);
    }

    let processed_path = args
        .processed
        .unwrap_or_else(|| config.store.processed_file.clone());
    let mut log = JsonProcessedLog::load(&processed_path)?;

    let pending: Vec<_> = documents
        .into_iter()
        .filter(|doc| args.reprocess || !log.contains(&doc.id))
        .collect();

    if pending.is_empty() {
        println!(
            "{} Nothing to do - all documents already processed",
            style("ℹ").blue()
        );
        return Ok(());
    }

    println!(
        "{} Found {} new documents to process",
        style("ℹ").blue(),
        pending.len()
    );

    let ruleset = config.load_ruleset()?;
    let parser = WasteReportParser::from_rules(&ruleset)?
        .with_date_marker(config.extraction.date_marker.clone())
        .with_section_fallback(config.extraction.section_fallback);

    let store_path = args.store.unwrap_or_else(|| config.store.records_file.clone());
    let mut sink = CsvSink::append_to(&store_path)?;

    let pb = ProgressBar::new(pending.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut total_records = 0usize;
    let mut total_discards = 0usize;
    let mut empty_documents = Vec::new();

    for document in &pending {
        let report = parser.scan(&document.text, document.fallback_date);
        debug!(
            id = %document.id,
            records = report.records.len(),
            discards = report.discards.len(),
            "scanned document"
        );

        if report.records.is_empty() {
            warn!("no records extracted from {}", document.id);
            empty_documents.push(document.id.clone());
        } else {
            let location = document.location.as_deref().unwrap_or("Unknown");
            sink.append(location, &report.records)?;
            total_records += report.records.len();
        }
        total_discards += report.discards.len();

        log.mark(&document.id);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    sink.flush()?;
    log.commit()?;

    println!();
    println!(
        "{} Processed {} documents in {:?}",
        style("✓").green(),
        pending.len(),
        start.elapsed()
    );
    println!(
        "   {} records appended to {}, {} candidates discarded",
        style(total_records).green(),
        store_path.display(),
        total_discards
    );

    if !empty_documents.is_empty() {
        println!();
        println!("{}", style("Documents with no records:").yellow());
        for id in &empty_documents {
            println!("  - {}", id);
        }
    }

    Ok(())
}
