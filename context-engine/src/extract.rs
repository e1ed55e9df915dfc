//! Fixed-radius context extraction.
//!
//! The raw-window primitive behind everything else: for each changed range,
//! cut `radius` extra lines on both sides, clamped to the file.

use std::path::Path;

use hunk_locator::LineRange;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::lines::{SourceFile, clamp_window};

/// One context snippet for one hunk.
///
/// `context_start..=context_end` always contains `hunk_start..=hunk_end`
/// when derived from a well-formed source span, and both bounds are clamped
/// to `[1, total_lines]`. `snippet` is the verbatim file text over the
/// context span, line terminators included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub file_path: String,
    pub hunk_start: usize,
    pub hunk_end: usize,
    pub context_start: usize,
    pub context_end: usize,
    pub snippet: String,
}

/// Fixed-radius extraction: one record per range, in input order.
///
/// Fails only when `file_path` is missing from disk; see
/// [`crate::errors::Error::SourceUnavailable`].
pub fn extract_context(
    file_path: &Path,
    ranges: &[LineRange],
    radius: usize,
) -> Result<Vec<ContextRecord>> {
    let source = SourceFile::read(file_path)?;
    Ok(ranges
        .iter()
        .map(|range| record_for_span(file_path, &source, *range, *range, radius))
        .collect())
}

/// Build a record for `hunk`, showing `span` padded by `radius`.
///
/// The fixed-radius path passes `span == hunk`; the symbol path passes the
/// enclosing definition's span instead.
pub(crate) fn record_for_span(
    file_path: &Path,
    source: &SourceFile,
    hunk: LineRange,
    span: LineRange,
    radius: usize,
) -> ContextRecord {
    let (context_start, context_end) =
        clamp_window(span.start, span.end, source.total_lines(), radius);
    ContextRecord {
        file_path: file_path.display().to_string(),
        hunk_start: hunk.start,
        hunk_end: hunk.end,
        context_start,
        context_end,
        snippet: source.slice(context_start, context_end),
    }
}
