//! Markdown prompt composition.
//!
//! One header per snippet, path plus the context line span, then the code in
//! a plain fence. Trailing newlines are trimmed inside the fence so a
//! snippet never ends in a blank line before the closing backticks.

use context_engine::ContextRecord;

pub fn compose(records: &[ContextRecord], ticket: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("# Code Review Prompt\n\n");
    if let Some(ticket) = ticket {
        out.push_str(&format!("**Ticket**: {ticket}\n\n"));
    }
    out.push_str("## Context Snippets\n\n");

    for rec in records {
        out.push_str(&format!(
            "### {}:{}-{}\n",
            rec.file_path, rec.context_start, rec.context_end
        ));
        out.push_str("```\n");
        out.push_str(rec.snippet.trim_end_matches(['\n', '\r']));
        out.push_str("\n```\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str, start: usize, end: usize, snippet: &str) -> ContextRecord {
        ContextRecord {
            file_path: path.to_string(),
            hunk_start: start,
            hunk_end: end,
            context_start: start,
            context_end: end,
            snippet: snippet.to_string(),
        }
    }

    #[test]
    fn layout_matches_the_expected_shape() {
        let recs = vec![record("src/app.py", 1, 3, "def foo():\n    pass\n")];
        let got = compose(&recs, Some("PROJ-42"));
        assert_eq!(
            got,
            "# Code Review Prompt\n\n\
             **Ticket**: PROJ-42\n\n\
             ## Context Snippets\n\n\
             ### src/app.py:1-3\n\
             ```\n\
             def foo():\n    pass\n\
             ```\n\n"
        );
    }

    #[test]
    fn ticket_line_is_optional() {
        let got = compose(&[], None);
        assert!(!got.contains("**Ticket**"));
        assert!(got.starts_with("# Code Review Prompt\n"));
    }
}
