//! CLI surface and the run pipeline.
//!
//! Thin glue over the two library crates: locate hunks against a base
//! revision, extract a context snippet per hunk (symbol-aware where
//! possible), compose the review prompt, write it out.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use context_engine::{ContextRecord, Error as EngineError, extract_by_symbol, extract_context};
use tracing::debug;

use crate::output::{self, Sink};
use crate::prompt;

#[derive(Debug, Parser)]
#[command(name = "review-prompt", version, about = "Generate a code-review prompt from a git diff")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Diff against a base revision and build the review prompt.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Commit/branch/tag to diff against.
    #[arg(long, default_value = "main")]
    base: String,

    /// Ticket ID embedded in the prompt header.
    #[arg(long)]
    ticket: Option<String>,

    /// Lines of context around each touched symbol.
    #[arg(long, default_value_t = 50)]
    context_lines: usize,

    /// `stdout` or a file path.
    #[arg(long, default_value = "stdout")]
    out: Sink,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Markdown,
    Json,
}

impl Cli {
    pub fn dispatch(self) -> Result<()> {
        match self.command {
            Command::Run(args) => run(args),
        }
    }
}

fn run(args: RunArgs) -> Result<()> {
    let repo_root = std::env::current_dir()?;
    let hunks = hunk_locator::locate_hunks(&repo_root, &args.base);
    if hunks.is_empty() {
        println!("{}", "No changes detected.".yellow());
        return Ok(());
    }

    let records = collect_records(&hunks, args.context_lines)?;
    if records.is_empty() {
        println!("{}", "No context available for the detected changes.".yellow());
        return Ok(());
    }

    let body = match args.format {
        Format::Markdown => prompt::compose(&records, args.ticket.as_deref()),
        Format::Json => serde_json::to_string_pretty(&records)?,
    };
    output::write(&args.out, &body)
}

/// One record per hunk, concatenated in diff order across files.
///
/// Symbol-aware extraction first; an empty result (unsupported file type)
/// drops to the fixed-radius extractor for the whole file. Files missing
/// from the working tree are skipped.
fn collect_records(
    hunks: &hunk_locator::HunkMap,
    context_lines: usize,
) -> Result<Vec<ContextRecord>> {
    let mut records = Vec::new();
    for file in hunks.files() {
        if file.ranges.is_empty() {
            continue;
        }
        let path = Path::new(&file.path);

        let snippets = match extract_by_symbol(path, &file.ranges, context_lines) {
            Ok(snippets) => snippets,
            Err(EngineError::SourceUnavailable(p)) => {
                debug!(path = %p.display(), "file gone from working tree, skipping");
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if snippets.is_empty() {
            records.extend(extract_context(path, &file.ranges, context_lines)?);
        } else {
            records.extend(snippets);
        }
    }
    Ok(records)
}
