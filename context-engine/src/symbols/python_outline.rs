//! Regex outline fallback for Python.
//!
//! Activated only when the grammar path produced nothing. Finds `def` /
//! `class` header lines and closes each block at the last line indented
//! deeper than its header, skipping blanks. Approximate on purpose: good
//! enough to anchor a context window, no parse required.

use regex::Regex;

use super::{SymbolSpan, SymbolSource};

pub struct PythonOutline {
    header: Regex,
}

impl PythonOutline {
    pub fn new() -> Self {
        Self {
            header: Regex::new(r"^([ \t]*)(?:async[ \t]+)?(?:def|class)[ \t]+[A-Za-z_]\w*")
                .unwrap(),
        }
    }
}

impl Default for PythonOutline {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolSource for PythonOutline {
    fn name(&self) -> &'static str {
        "python-outline"
    }

    fn try_extract(&self, source: &str) -> Option<Vec<SymbolSpan>> {
        let lines: Vec<&str> = source.lines().collect();
        let mut spans = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            let Some(cap) = self.header.captures(line) else {
                continue;
            };
            let header_indent = cap.get(1).map_or(0, |m| m.as_str().len());

            // Block runs while lines are blank or indented past the header;
            // trailing blanks stay outside the span.
            let start = idx + 1;
            let mut end = start;
            for (j, candidate) in lines.iter().enumerate().skip(idx + 1) {
                if candidate.trim().is_empty() {
                    continue;
                }
                if indent_of(candidate) > header_indent {
                    end = j + 1;
                } else {
                    break;
                }
            }
            spans.push(SymbolSpan { start, end });
        }

        if spans.is_empty() { None } else { Some(spans) }
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_top_level_blocks() {
        let source = "\
def foo():
    x = 1
    y = 2

def bar():
    pass
";
        let spans = PythonOutline::new().try_extract(source).unwrap();
        assert_eq!(
            spans,
            vec![
                SymbolSpan { start: 1, end: 3 },
                SymbolSpan { start: 5, end: 6 },
            ]
        );
    }

    #[test]
    fn nested_method_gets_its_own_span() {
        let source = "\
class Box:
    def open(self):
        return 1
";
        let spans = PythonOutline::new().try_extract(source).unwrap();
        assert_eq!(
            spans,
            vec![
                SymbolSpan { start: 1, end: 3 },
                SymbolSpan { start: 2, end: 3 },
            ]
        );
    }

    #[test]
    fn blank_lines_inside_a_block_do_not_close_it() {
        let source = "def foo():\n    a = 1\n\n    b = 2\nx = 3\n";
        let spans = PythonOutline::new().try_extract(source).unwrap();
        assert_eq!(spans, vec![SymbolSpan { start: 1, end: 4 }]);
    }

    #[test]
    fn declines_without_headers() {
        assert!(PythonOutline::new().try_extract("x = 1\n").is_none());
    }
}
