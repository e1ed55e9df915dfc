//! Symbol-aware context extraction.
//!
//! Responsibilities:
//! - Define the [`SymbolSource`] seam: a strategy that turns source text
//!   into definition line spans, or declines;
//! - Run the strategy chain in order (tree-sitter first, then the
//!   grammar-free outline scan) until one yields spans;
//! - Match each hunk to its *innermost* enclosing definition and cut the
//!   context around the whole definition instead of the raw hunk.
//!
//! Degradation is strictly ordered: a non-Python file returns an empty
//! result by contract (the caller then uses the fixed-radius extractor);
//! a Python file nothing in the chain can parse degrades to fixed-radius
//! for every range; a parsed file with a hunk outside every definition
//! degrades to fixed-radius for that range only.

mod python_ast;
mod python_outline;

use std::path::Path;

use hunk_locator::LineRange;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use python_ast::PythonAst;
pub use python_outline::PythonOutline;

use crate::errors::{Error, Result};
use crate::extract::{ContextRecord, extract_context, record_for_span};
use crate::lines::SourceFile;

/// Line span of one function/method/class definition (1-based inclusive),
/// taken from the post-change file. Nested definitions each get their own
/// span; no deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSpan {
    pub start: usize,
    pub end: usize,
}

impl SymbolSpan {
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line <= self.end
    }

    fn len(&self) -> usize {
        self.end - self.start
    }
}

/// One strategy for finding definition spans in source text.
///
/// `try_extract` returns `None` when the strategy cannot make sense of the
/// input; the chain then moves on. Parser availability is injected through
/// this seam, so the matching logic is testable without any grammar.
pub trait SymbolSource {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    fn try_extract(&self, source: &str) -> Option<Vec<SymbolSpan>>;
}

/// Default chain: tree-sitter grammar first, indentation outline second.
pub fn default_sources() -> Vec<Box<dyn SymbolSource>> {
    vec![Box::new(PythonAst), Box::new(PythonOutline::new())]
}

/// Symbol-aware extraction with the default strategy chain.
///
/// Returns an empty vector for any file not recognized as Python; the
/// caller is expected to fall back to [`extract_context`] itself in that
/// case, per contract.
pub fn extract_by_symbol(
    file_path: &Path,
    ranges: &[LineRange],
    radius: usize,
) -> Result<Vec<ContextRecord>> {
    extract_with_sources(file_path, ranges, radius, &default_sources())
}

/// Symbol-aware extraction with a caller-provided strategy chain.
pub fn extract_with_sources(
    file_path: &Path,
    ranges: &[LineRange],
    radius: usize,
    sources: &[Box<dyn SymbolSource>],
) -> Result<Vec<ContextRecord>> {
    if !file_path.is_file() {
        return Err(Error::SourceUnavailable(file_path.to_path_buf()));
    }
    if !is_python(file_path) {
        return Ok(Vec::new());
    }

    let source = SourceFile::read(file_path)?;

    let Some(spans) = collect_symbols(source.text(), sources) else {
        // Nothing in the chain produced spans; the whole call degrades.
        debug!(path = %file_path.display(), "no symbol source succeeded, using fixed radius");
        return extract_context(file_path, ranges, radius);
    };

    let mut records = Vec::with_capacity(ranges.len());
    for range in ranges {
        let span = innermost_enclosing(&spans, range.start);
        match span {
            Some(sym) => records.push(record_for_span(
                file_path,
                &source,
                *range,
                LineRange::new(sym.start, sym.end),
                radius,
            )),
            // Hunk outside every definition (module level, blank region).
            None => records.push(record_for_span(file_path, &source, *range, *range, radius)),
        }
    }
    Ok(records)
}

/// Run the chain until a strategy yields at least one span.
fn collect_symbols(
    source: &str,
    sources: &[Box<dyn SymbolSource>],
) -> Option<Vec<SymbolSpan>> {
    for src in sources {
        match src.try_extract(source) {
            Some(spans) if !spans.is_empty() => {
                debug!(strategy = src.name(), count = spans.len(), "symbols collected");
                return Some(spans);
            }
            _ => debug!(strategy = src.name(), "strategy yielded nothing"),
        }
    }
    None
}

/// Smallest span containing `line`, i.e. the innermost definition.
///
/// The span list arrives in discovery order, where an outer class precedes
/// its methods; picking the first containing span would therefore select
/// the outermost definition. The innermost one gives tighter, more relevant
/// context, so ties on size aside, the minimum-length span wins.
fn innermost_enclosing(spans: &[SymbolSpan], line: usize) -> Option<SymbolSpan> {
    spans
        .iter()
        .filter(|s| s.contains(line))
        .min_by_key(|s| s.len())
        .copied()
}

fn is_python(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("py"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_wins_over_discovery_order() {
        // Outer class discovered first, then its method.
        let spans = [
            SymbolSpan { start: 1, end: 20 },
            SymbolSpan { start: 5, end: 9 },
        ];
        assert_eq!(
            innermost_enclosing(&spans, 6),
            Some(SymbolSpan { start: 5, end: 9 })
        );
        // Outside the method but inside the class.
        assert_eq!(
            innermost_enclosing(&spans, 15),
            Some(SymbolSpan { start: 1, end: 20 })
        );
        assert_eq!(innermost_enclosing(&spans, 25), None);
    }

    #[test]
    fn python_detection_is_extension_based() {
        assert!(is_python(Path::new("pkg/mod.py")));
        assert!(is_python(Path::new("UPPER.PY")));
        assert!(!is_python(Path::new("notes.txt")));
        assert!(!is_python(Path::new("py")));
    }
}
