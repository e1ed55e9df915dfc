//! Context extraction for code-review prompts.
//!
//! Given a file and its changed line ranges (from `hunk-locator`), produce
//! one context snippet per range:
//! - [`extract_by_symbol`] prefers the innermost enclosing function /
//!   method / class definition over raw lines (Python only, with a
//!   multi-strategy parse chain and a documented fallback order);
//! - [`extract_context`] is the fixed-radius fallback the symbol path
//!   reuses for everything it cannot match.
//!
//! Everything is synchronous and per-file: one read, no caching, no state
//! shared across files.

pub mod errors;
mod extract;
mod lines;
pub mod symbols;

pub use errors::{Error, Result};
pub use extract::{ContextRecord, extract_context};
pub use symbols::{
    SymbolSource, SymbolSpan, default_sources, extract_by_symbol, extract_with_sources,
};
