//! Tree-sitter symbol source for Python.
//!
//! A fresh `Parser` per call: extraction is per-file per-invocation, and the
//! parser is cheap to configure next to the parse itself.

use tree_sitter::{Language, Parser};

use super::{SymbolSpan, SymbolSource};

/// Primary strategy: parse with the compiled Python grammar and collect
/// every class/function definition node, nested ones included.
pub struct PythonAst;

impl SymbolSource for PythonAst {
    fn name(&self) -> &'static str {
        "python-ast"
    }

    fn try_extract(&self, source: &str) -> Option<Vec<SymbolSpan>> {
        let mut parser = Parser::new();
        let lang: Language = tree_sitter_python::LANGUAGE.into();
        parser.set_language(&lang).ok()?;
        let tree = parser.parse(source, None)?;

        let mut spans = Vec::new();
        let mut stack = vec![tree.root_node()];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "class_definition" | "function_definition" | "async_function_definition" => {
                    // Rows are 0-based; spans are 1-based inclusive.
                    spans.push(SymbolSpan {
                        start: node.start_position().row + 1,
                        end: node.end_position().row + 1,
                    });
                }
                _ => {}
            }
            let mut walk = node.walk();
            for child in node.children(&mut walk) {
                stack.push(child);
            }
        }

        // Tree-sitter always returns a tree; a broken file shows up as ERROR
        // nodes. With errors and nothing collected, decline so the next
        // strategy gets a chance.
        if spans.is_empty() && tree.root_node().has_error() {
            return None;
        }
        Some(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_nested_definitions() {
        let source = "\
class Widget:
    def resize(self, w, h):
        self.w = w
        self.h = h

def main():
    pass
";
        let spans = PythonAst.try_extract(source).unwrap();
        assert!(spans.contains(&SymbolSpan { start: 1, end: 4 })); // class
        assert!(spans.contains(&SymbolSpan { start: 2, end: 4 })); // method
        assert!(spans.contains(&SymbolSpan { start: 6, end: 7 })); // function
    }

    #[test]
    fn async_defs_are_symbols_too() {
        let source = "async def fetch():\n    return 1\n";
        let spans = PythonAst.try_extract(source).unwrap();
        assert_eq!(spans, vec![SymbolSpan { start: 1, end: 2 }]);
    }

    #[test]
    fn broken_source_with_no_symbols_declines() {
        assert!(PythonAst.try_extract("((((\n").is_none());
    }

    #[test]
    fn plain_script_yields_no_spans() {
        let spans = PythonAst.try_extract("x = 1\nprint(x)\n").unwrap();
        assert!(spans.is_empty());
    }
}
