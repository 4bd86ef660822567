//! Command-line interface for citecheck.
//!
//! Provides commands for verifying a single quote against a source
//! text, checking every citation in a structured answer, inspecting
//! text normalization, and showing the resolved configuration.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::citation::{check_answer, QuotedAnswer};
use crate::config;
use crate::source::{pad_metadata_fields, sanitize_metadata_fields, SourceDocument};
use crate::verify::{check_quote, normalize, MatcherConfig, SegmentOutcome};

/// citecheck - citation-integrity checker for document QA answers
#[derive(Parser, Debug)]
#[command(name = "citecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify a single quote against a source text
    Check {
        /// The claimed quote
        quote: String,

        /// Source text file (reads from stdin if not provided)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Require at least one qualifying checkpoint
        #[arg(long)]
        strict: bool,

        /// Print the detailed check as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify every citation in a structured answer
    Report {
        /// QuotedAnswer JSON file
        #[arg(short, long)]
        answer: PathBuf,

        /// Retrieved documents JSON file (array of {content, metadata})
        #[arg(short, long)]
        docs: PathBuf,

        /// Print the full report as JSON instead of rendered text
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical form of input text (debug aid)
    Normalize {
        /// Input file (reads from stdin if not provided)
        input: Option<PathBuf>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check {
                quote,
                source,
                strict,
                json,
            } => execute_check(&quote, source, strict, json),
            Commands::Report { answer, docs, json } => execute_report(&answer, &docs, json),
            Commands::Normalize { input } => execute_normalize(input),
            Commands::Config => execute_config(),
        }
    }
}

/// Read from a file, or stdin when no path is given
fn read_input(path: Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn execute_check(quote: &str, source: Option<PathBuf>, strict: bool, json: bool) -> Result<()> {
    let source_text = read_input(source)?;

    let mut matcher = config::config()?.matcher;
    if strict {
        matcher.require_checkpoint = true;
    }

    let check = check_quote(quote, &source_text, &matcher);

    if json {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        println!("Verdict: {}", check.verdict.as_str());
        for segment in &check.segments {
            match &segment.outcome {
                SegmentOutcome::Matched { start, end } => {
                    println!("  matched   \"{}\" at {}..{}", segment.segment, start, end)
                }
                SegmentOutcome::Skipped => {
                    println!("  skipped   \"{}\" (below token threshold)", segment.segment)
                }
                SegmentOutcome::NotFound { cursor } => {
                    println!(
                        "  not found \"{}\" (searched from offset {})",
                        segment.segment, cursor
                    )
                }
            }
        }
    }

    if !check.verified() {
        std::process::exit(1);
    }
    Ok(())
}

fn execute_report(answer_path: &PathBuf, docs_path: &PathBuf, json: bool) -> Result<()> {
    let answer_json = std::fs::read_to_string(answer_path)
        .with_context(|| format!("Failed to read answer file: {}", answer_path.display()))?;
    let answer = QuotedAnswer::from_json(&answer_json)
        .with_context(|| format!("Failed to parse answer file: {}", answer_path.display()))?;

    let docs_json = std::fs::read_to_string(docs_path)
        .with_context(|| format!("Failed to read documents file: {}", docs_path.display()))?;
    let mut documents: Vec<SourceDocument> = serde_json::from_str(&docs_json)
        .with_context(|| format!("Failed to parse documents file: {}", docs_path.display()))?;

    // Loader metadata is ragged; make it uniform before formatting
    pad_metadata_fields(&mut documents);
    sanitize_metadata_fields(&mut documents);

    let matcher = config::config()?.matcher;
    let report = check_answer(&answer, &documents, &matcher)?;

    info!(
        citations = report.checks.len(),
        verified = report.verified_count,
        trivial = report.trivial_count,
        unverified = report.unverified_count,
        "answer checked"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.render());
    }

    if !report.all_verified() {
        std::process::exit(1);
    }
    Ok(())
}

fn execute_normalize(input: Option<PathBuf>) -> Result<()> {
    let text = read_input(input)?;
    println!("{}", normalize(&text));
    Ok(())
}

fn execute_config() -> Result<()> {
    let resolved = config::config()?;
    let MatcherConfig {
        min_segment_tokens,
        require_checkpoint,
    } = resolved.matcher;

    match &resolved.config_file {
        Some(path) => println!("Config file:        {}", path.display()),
        None => println!("Config file:        (none found, using defaults)"),
    }
    println!("min_segment_tokens: {}", min_segment_tokens);
    println!("require_checkpoint: {}", require_checkpoint);
    Ok(())
}
