//! Java Javadoc extraction.

use crate::parser::treesitter::{CommentDocExtractor, Config};
use crate::parser::DocExtractor;

const COMMENT_QUERY: &str = "(block_comment) @comment";

/// Create a new Java doc extractor.
pub fn new_extractor() -> Box<dyn DocExtractor> {
    Box::new(CommentDocExtractor::new(Config {
        language: tree_sitter_java::LANGUAGE.into(),
        language_name: "java",
        comment_query: COMMENT_QUERY,
        line_prefixes: &[],
        block_prefixes: &["/**"],
        excluded_prefixes: &["/***"],
    }))
}

/// Register Java extractor for .java extension.
pub fn register() {
    crate::parser::register(".java", new_extractor);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_javadoc() {
        let extractor = new_extractor();
        let source = br#"
public class Store {
    /**
     * Saves the record.
     *
     * Always flushes to disk before returning.
     */
    public void save(Record r) {}

    /* not javadoc */
    private int size;
}
"#;

        let docs = extractor.extract_docs(source).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].line, 3);
        assert_eq!(
            docs[0].text,
            "Saves the record.\n\nAlways flushes to disk before returning."
        );
    }
}
