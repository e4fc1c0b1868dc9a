//! TypeScript TSDoc extraction.

use super::javascript::COMMENT_QUERY;
use crate::parser::treesitter::{CommentDocExtractor, Config};
use crate::parser::DocExtractor;

/// Create a new TypeScript doc extractor.
pub fn new_extractor() -> Box<dyn DocExtractor> {
    Box::new(CommentDocExtractor::new(Config {
        language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        language_name: "typescript",
        comment_query: COMMENT_QUERY,
        line_prefixes: &[],
        block_prefixes: &["/**"],
        excluded_prefixes: &["/***"],
    }))
}

/// Register TypeScript extractor for .ts extension.
pub fn register() {
    crate::parser::register(".ts", new_extractor);
}
