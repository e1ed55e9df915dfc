//! Unified-diff hunk location.
//!
//! Turns a diff between two revisions into a per-file list of changed line
//! ranges in the *new* revision's coordinates:
//! - `parse_unified_diff` is the pure parser: only `+++` file headers and
//!   `@@` hunk headers matter, everything else is skipped.
//! - `locate_hunks` runs `git diff --unified=0` (zero context, so each hunk
//!   header reports exactly the changed region) and parses its output.
//!
//! Diff failures are non-fatal: a bad revision, a missing `git`, or a
//! directory that is not a repository all yield an empty map.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inclusive 1-based line range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Hunk ranges of one file, in diff order.
#[derive(Debug, Clone)]
pub struct FileHunks {
    /// Repo-relative path with forward-slash separators, as printed by git.
    pub path: String,
    pub ranges: Vec<LineRange>,
}

/// File → hunk ranges, preserving diff order across files.
///
/// Backed by a vector rather than a hash map so iteration follows the order
/// files appear in the diff; lookups are linear, which is fine for the file
/// counts a single change set produces.
#[derive(Debug, Clone, Default)]
pub struct HunkMap {
    files: Vec<FileHunks>,
}

impl HunkMap {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Iterate files in diff order.
    pub fn files(&self) -> impl Iterator<Item = &FileHunks> {
        self.files.iter()
    }

    /// Ranges recorded for `path`, if the diff touched it.
    pub fn ranges(&self, path: &str) -> Option<&[LineRange]> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.ranges.as_slice())
    }

    /// Register `path` (keeping first-seen order) and return its range list.
    fn entry(&mut self, path: &str) -> &mut Vec<LineRange> {
        if let Some(idx) = self.files.iter().position(|f| f.path == path) {
            return &mut self.files[idx].ranges;
        }
        self.files.push(FileHunks {
            path: path.to_string(),
            ranges: Vec::new(),
        });
        &mut self.files.last_mut().unwrap().ranges
    }
}

/// Parses unified-diff text into a [`HunkMap`].
///
/// Tracks the current file via `+++` headers. A `/dev/null` target marks a
/// deleted file: no entry is registered and subsequent hunk lines are
/// ignored until the next file header. A valid header registers its file
/// immediately, even if no hunk lines follow.
pub fn parse_unified_diff(text: &str) -> HunkMap {
    let mut map = HunkMap::default();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if let Some(header) = line.strip_prefix("+++ ") {
            current = new_file_path(header);
            if let Some(path) = &current {
                map.entry(path);
            }
            continue;
        }

        if line.starts_with("@@ ") {
            let Some(path) = &current else { continue };
            if let Some(range) = parse_hunk_header(line) {
                map.entry(path).push(range);
            }
            continue;
        }

        // Content lines, `---` headers, `\ No newline at end of file`
        // markers and other prelude are irrelevant here.
    }

    map
}

/// Extract the path from a `+++` header payload, or `None` for deletions.
fn new_file_path(header: &str) -> Option<String> {
    let raw = header.trim_end();
    if raw == "/dev/null" {
        return None;
    }
    // `b/` prefix for the post-image; `a/` shows up with unusual diff flags.
    let path = raw
        .strip_prefix("b/")
        .or_else(|| raw.strip_prefix("a/"))
        .unwrap_or(raw);
    Some(path.to_string())
}

/// Parse `@@ -o[,ol] +n[,nl] @@ ...` and return the "+" side as a range.
///
/// `nl` defaults to 1 (single-line shorthand). A zero-length hunk is a pure
/// deletion; it is recorded as the single point `(n, n)` so the change still
/// has an anchor in the new file.
fn parse_hunk_header(line: &str) -> Option<LineRange> {
    let plus = line
        .split_whitespace()
        .find(|tok| tok.starts_with('+'))?
        .trim_start_matches('+');

    let (start, len) = match plus.split_once(',') {
        Some((s, l)) => (s.parse().ok()?, l.parse().ok()?),
        None => (plus.parse().ok()?, 1),
    };

    if start == 0 {
        // `+0,0` appears for newly empty targets; nothing to anchor on.
        return None;
    }
    let end = if len == 0 { start } else { start + len - 1 };
    Some(LineRange::new(start, end))
}

/// Diff the working tree against `base` and return changed ranges per file.
///
/// Invoked with `--unified=0` so hunk headers carry no context padding. Any
/// failure to run git or a non-zero exit is treated as "no changes".
pub fn locate_hunks(repo_root: &Path, base: &str) -> HunkMap {
    let output = match Command::new("git")
        .arg("diff")
        .arg("--unified=0")
        .arg(base)
        .current_dir(repo_root)
        .output()
    {
        Ok(out) => out,
        Err(err) => {
            debug!(%err, "git diff could not be spawned");
            return HunkMap::default();
        }
    };

    if !output.status.success() {
        debug!(status = ?output.status.code(), base, "git diff failed");
        return HunkMap::default();
    }

    parse_unified_diff(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_two_hunks() {
        let diff = "\
diff --git a/foo.txt b/foo.txt
--- a/foo.txt
+++ b/foo.txt
@@ -1,2 +1,3 @@
+x
@@ -10 +12,2 @@
+y
+z
";
        let map = parse_unified_diff(diff);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.ranges("foo.txt").unwrap(),
            &[LineRange::new(1, 3), LineRange::new(12, 13)]
        );
    }

    #[test]
    fn omitted_new_len_defaults_to_one() {
        let diff = "+++ b/a.py\n@@ -2 +2 @@\n+line\n";
        let map = parse_unified_diff(diff);
        assert_eq!(map.ranges("a.py").unwrap(), &[LineRange::new(2, 2)]);
    }

    #[test]
    fn pure_deletion_recorded_as_point() {
        let diff = "+++ b/a.py\n@@ -4,2 +3,0 @@\n-gone\n-gone\n";
        let map = parse_unified_diff(diff);
        assert_eq!(map.ranges("a.py").unwrap(), &[LineRange::new(3, 3)]);
    }

    #[test]
    fn deleted_file_is_excluded() {
        let diff = "\
--- a/dead.py
+++ /dev/null
@@ -1,5 +0,0 @@
-a
--- a/alive.py
+++ b/alive.py
@@ -1 +1 @@
+a
";
        let map = parse_unified_diff(diff);
        assert_eq!(map.len(), 1);
        assert!(map.ranges("dead.py").is_none());
        assert_eq!(map.ranges("alive.py").unwrap(), &[LineRange::new(1, 1)]);
    }

    #[test]
    fn hunks_before_any_header_are_ignored() {
        let diff = "@@ -1 +1,2 @@\n+orphan\n+++ b/late.py\n@@ -1 +1 @@\n+ok\n";
        let map = parse_unified_diff(diff);
        assert_eq!(map.len(), 1);
        assert_eq!(map.ranges("late.py").unwrap(), &[LineRange::new(1, 1)]);
    }

    #[test]
    fn marker_lines_do_not_confuse_the_parser() {
        let diff = "\
+++ b/x.py
@@ -1 +1 @@
+new
\\ No newline at end of file
";
        let map = parse_unified_diff(diff);
        assert_eq!(map.ranges("x.py").unwrap(), &[LineRange::new(1, 1)]);
    }

    #[test]
    fn file_order_follows_the_diff() {
        let diff = "\
+++ b/zz.py
@@ -1 +1 @@
+a
+++ b/aa.py
@@ -1 +1 @@
+b
";
        let map = parse_unified_diff(diff);
        let order: Vec<&str> = map.files().map(|f| f.path.as_str()).collect();
        assert_eq!(order, vec!["zz.py", "aa.py"]);
    }

    #[test]
    fn header_without_hunks_still_registers_the_file() {
        let map = parse_unified_diff("+++ b/empty.py\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.ranges("empty.py").unwrap(), &[] as &[LineRange]);
    }

    #[test]
    fn locate_hunks_outside_a_repo_is_empty() {
        let map = locate_hunks(Path::new("/"), "main");
        assert!(map.is_empty());
    }
}
