//! Python docstring extraction.
//!
//! Docstrings are the string literal that opens a module, class or function
//! body. Definitions are visited breadth-first so outer docstrings come before
//! nested ones.

use std::collections::VecDeque;

use tree_sitter::{Language, Node, Parser as TsParser};

use crate::parser::{clean_indentation, DocComment, DocExtractor, DocOwner};

/// Tree-sitter based docstring extractor.
pub struct PythonDocExtractor {
    language: Language,
}

impl PythonDocExtractor {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonDocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocExtractor for PythonDocExtractor {
    fn extract_docs(&self, source: &[u8]) -> anyhow::Result<Vec<DocComment>> {
        let mut parser = TsParser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse source"))?;
        let root = tree.root_node();

        let mut docs = Vec::new();

        if let Some(text) = docstring_of(root, source) {
            docs.push(DocComment {
                text,
                line: 0,
                owner: DocOwner::Module,
            });
        }

        let mut queue = VecDeque::new();
        queue.push_back(root);

        while let Some(node) = queue.pop_front() {
            let owner = match node.kind() {
                "function_definition" => Some(DocOwner::Function),
                "class_definition" => Some(DocOwner::Class),
                _ => None,
            };

            if let Some(owner) = owner {
                let body = node.child_by_field_name("body");
                if let Some(text) = body.and_then(|b| docstring_of(b, source)) {
                    docs.push(DocComment {
                        text,
                        line: node.start_position().row + 1,
                        owner,
                    });
                }
            }

            let mut cursor = node.walk();
            queue.extend(node.named_children(&mut cursor));
        }

        Ok(docs)
    }

    fn language(&self) -> &str {
        "python"
    }
}

/// Docstring of a module or block node, if its first statement is a string.
fn docstring_of(block: Node, source: &[u8]) -> Option<String> {
    let mut cursor = block.walk();
    let first = block
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment")?;

    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    let literal = first.named_child(0)?;
    if literal.kind() != "string" {
        return None;
    }

    let raw = literal.utf8_text(source).ok()?;
    let body = strip_string_literal(raw)?;
    Some(clean_indentation(body))
}

/// Strip prefix and quotes from a string literal. Byte and f-strings are not
/// docstrings.
fn strip_string_literal(raw: &str) -> Option<&str> {
    let quote_at = raw.find(['"', '\''])?;
    let prefix = raw[..quote_at].to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }

    let quoted = &raw[quote_at..];
    for delim in ["\"\"\"", "'''", "\"", "'"] {
        if quoted.len() >= 2 * delim.len() && quoted.starts_with(delim) && quoted.ends_with(delim) {
            return Some(&quoted[delim.len()..quoted.len() - delim.len()]);
        }
    }
    None
}

/// Create a new Python docstring extractor.
pub fn new_extractor() -> Box<dyn DocExtractor> {
    Box::new(PythonDocExtractor::new())
}

/// Register the Python extractor for .py extension.
pub fn register() {
    crate::parser::register(".py", new_extractor);
}
