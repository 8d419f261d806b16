//! Rules command - manage the normalization ruleset.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use crumb_core::normalize::{Normalizer, RuleSet};

use super::load_config;

/// Arguments for the rules command.
#[derive(Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Subcommand)]
enum RulesCommand {
    /// Export the active ruleset to an editable JSON file
    Export(ExportArgs),

    /// Validate a ruleset file and show table sizes
    Check {
        /// Ruleset JSON file
        file: PathBuf,
    },

    /// Run one raw item name through the pipeline, showing each stage
    Apply {
        /// Raw item name, e.g. "2 day old Croissantf"
        name: String,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Output path
    #[arg(short, long, default_value = "ruleset.json")]
    output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: RulesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        RulesCommand::Export(export_args) => export(export_args, config_path),
        RulesCommand::Check { file } => check(&file),
        RulesCommand::Apply { name } => apply(&name, config_path),
    }
}

fn export(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "File already exists at {}. Use --force to overwrite.",
            args.output.display()
        );
    }

    let ruleset = load_config(config_path)?.load_ruleset()?;
    ruleset.save(&args.output)?;

    println!(
        "{} Wrote {} rules to {}",
        style("✓").green(),
        ruleset.rule_count(),
        args.output.display()
    );
    Ok(())
}

fn check(file: &std::path::Path) -> anyhow::Result<()> {
    let ruleset = RuleSet::from_file(file)?;

    // Compiling is the real validation; a bad pattern fails here.
    Normalizer::new(&ruleset)?;

    println!("{} Ruleset OK: {}", style("✓").green(), file.display());
    println!("  cleanup rewrites:    {}", ruleset.cleanup.len());
    println!("  vocabulary entries:  {}", ruleset.vocabulary.len());
    println!("  phrase rewrites:     {}", ruleset.phrases.len());
    println!("  post-clean rewrites: {}", ruleset.post_clean.len());
    println!("  abbreviations:       {}", ruleset.abbreviations.len());
    println!("  section headers:     {}", ruleset.section_headers.len());
    Ok(())
}

fn apply(name: &str, config_path: Option<&str>) -> anyhow::Result<()> {
    let ruleset = load_config(config_path)?.load_ruleset()?;
    let normalizer = Normalizer::new(&ruleset)?;

    let cleaned = normalizer.cleanup(name);
    let standardized = normalizer.standardize(&cleaned);
    let finished = normalizer.post_clean(&standardized);

    println!("input:       {:?}", name);
    println!("cleanup:     {:?}", cleaned);
    println!("standardize: {:?}", standardized);
    println!("post-clean:  {:?}", finished);

    if finished.chars().count() > 1 {
        println!("{} kept as {:?}", style("✓").green(), finished);
    } else {
        println!("{} discarded", style("✗").red());
    }
    Ok(())
}
