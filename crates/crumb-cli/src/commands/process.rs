//! Process command - extract records from a single document.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use crumb_core::report::{ExtractionReport, ReportParser, WasteReportParser, parse_mdy};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input text file (receipt OCR output or an email body)
    #[arg(required = true)]
    input: PathBuf,

    /// Fallback date (MM/DD/YYYY) used when the text carries no date
    #[arg(short, long)]
    date: Option<String>,

    /// Location label used for CSV output
    #[arg(short, long, default_value = "Unknown")]
    location: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show discarded candidates
    #[arg(long)]
    show_discards: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON records
    Json,
    /// CSV rows in store layout
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let fallback_date = match &args.date {
        Some(raw) => Some(
            parse_mdy(raw)
                .ok_or_else(|| anyhow::anyhow!("Invalid fallback date (want MM/DD/YYYY): {raw}"))?,
        ),
        None => None,
    };

    let text = fs::read_to_string(&args.input)?;
    info!("Processing {} ({} bytes)", args.input.display(), text.len());

    let ruleset = config.load_ruleset()?;
    let parser = WasteReportParser::from_rules(&ruleset)?
        .with_date_marker(config.extraction.date_marker.clone())
        .with_section_fallback(config.extraction.section_fallback);

    let report = parser.scan(&text, fallback_date);

    let output = format_report(&report, &args)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if args.show_discards && !report.discards.is_empty() {
        eprintln!("{}", style("Discarded candidates:").yellow());
        for discard in &report.discards {
            match discard.line {
                Some(line) => eprintln!("  line {}: {} ({})", line, discard.source, discard.reason),
                None => eprintln!("  document: {}", discard.reason),
            }
        }
    }

    Ok(())
}

fn format_report(report: &ExtractionReport, args: &ProcessArgs) -> anyhow::Result<String> {
    match args.format {
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(&report.records)?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(vec![]);
            wtr.write_record(["date", "location", "menu item", "waste count"])?;
            for record in &report.records {
                wtr.write_record([
                    record.date_string().as_str(),
                    args.location.as_str(),
                    record.item.as_str(),
                    record.count.to_string().as_str(),
                ])?;
            }
            Ok(String::from_utf8(wtr.into_inner()?)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for record in &report.records {
                out.push_str(&format!(
                    "{}  {:>3}  {}\n",
                    record.date_string(),
                    record.count,
                    record.item
                ));
            }
            match report.mode {
                Some(mode) => out.push_str(&format!(
                    "\n{} records ({:?}), {} discarded\n",
                    report.records.len(),
                    mode,
                    report.discards.len()
                )),
                None => out.push_str("no records extracted\n"),
            }
            Ok(out)
        }
    }
}
