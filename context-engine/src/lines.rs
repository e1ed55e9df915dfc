//! Source text access with exact line reproduction.
//!
//! Snippets must reproduce the file byte-for-byte over their line span, so
//! line splitting keeps the original terminators. Invalid UTF-8 is tolerated
//! (lossy decode), never fatal.

use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};

/// One source file, read once per extraction call.
#[derive(Debug)]
pub struct SourceFile {
    text: String,
}

impl SourceFile {
    /// Read `path`, or fail with [`Error::SourceUnavailable`] if it is not a
    /// regular file.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::SourceUnavailable(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        Ok(Self {
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// Full text, for handing to a structural parser.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines, counting a trailing fragment without `\n` as a line.
    pub fn total_lines(&self) -> usize {
        self.text.split_inclusive('\n').count()
    }

    /// Verbatim text of lines `start..=end` (1-based inclusive), terminators
    /// included. An inverted or out-of-range span yields an empty string.
    pub fn slice(&self, start: usize, end: usize) -> String {
        if start == 0 || end < start {
            return String::new();
        }
        self.text
            .split_inclusive('\n')
            .skip(start - 1)
            .take(end - start + 1)
            .collect()
    }
}

/// Pad `(start, end)` by `radius` on both sides, clamped to `[1, total]`.
pub fn clamp_window(start: usize, end: usize, total: usize, radius: usize) -> (usize, usize) {
    let s = start.saturating_sub(radius).max(1);
    let e = (end + radius).min(total);
    (s, e)
}
