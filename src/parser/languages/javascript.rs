//! JavaScript JSDoc extraction.

use crate::parser::treesitter::{CommentDocExtractor, Config};
use crate::parser::DocExtractor;

/// Comment query shared by JavaScript and TypeScript grammars.
pub(crate) const COMMENT_QUERY: &str = "(comment) @comment";

/// Create a new JavaScript doc extractor.
pub fn new_extractor() -> Box<dyn DocExtractor> {
    Box::new(CommentDocExtractor::new(Config {
        language: tree_sitter_javascript::LANGUAGE.into(),
        language_name: "javascript",
        comment_query: COMMENT_QUERY,
        line_prefixes: &[],
        block_prefixes: &["/**"],
        excluded_prefixes: &["/***"],
    }))
}

/// Register JavaScript extractor for .js extension.
pub fn register() {
    crate::parser::register(".js", new_extractor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsdoc() {
        let extractor = new_extractor();
        let source = br#"
// not documentation
/**
 * Fetches a user by id.
 * @returns {Promise<User>}
 */
function getUser(id) {
    /* inline */
    return db.find(id);
}
"#;

        let docs = extractor.extract_docs(source).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].line, 3);
        assert!(docs[0].text.starts_with("Fetches a user by id."));
        assert_eq!(extractor.language(), "javascript");
    }
}
