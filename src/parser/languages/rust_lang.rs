//! Rust doc comment extraction (`///`, `//!`, `/** */`, `/*! */`).

use crate::parser::treesitter::{CommentDocExtractor, Config};
use crate::parser::DocExtractor;

const COMMENT_QUERY: &str = r#"
(line_comment) @comment
(block_comment) @comment
"#;

/// Create a new Rust doc extractor.
pub fn new_extractor() -> Box<dyn DocExtractor> {
    Box::new(CommentDocExtractor::new(Config {
        language: tree_sitter_rust::LANGUAGE.into(),
        language_name: "rust",
        comment_query: COMMENT_QUERY,
        line_prefixes: &["///", "//!"],
        block_prefixes: &["/**", "/*!"],
        excluded_prefixes: &["////", "/***"],
    }))
}

/// Register Rust extractor for .rs extension.
pub fn register() {
    crate::parser::register(".rs", new_extractor);
}
