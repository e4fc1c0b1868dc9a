//! Inline documentation extraction from source files.
//!
//! This module provides:
//! - `DocExtractor` trait: Abstract interface for pulling doc comments out of source
//! - Registry: Factory-based extractor lookup by file extension
//! - Tree-sitter implementations for Python docstrings and `/** */`-style comments

use std::collections::HashMap;
use std::sync::{Once, RwLock};

#[cfg(feature = "tree-sitter")]
pub mod treesitter;

#[cfg(feature = "tree-sitter")]
pub mod languages;

/// Kind of code element a doc comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocOwner {
    Module,
    Function,
    Class,
    /// Owner unknown (comment-based extraction does not resolve it)
    Item,
}

impl DocOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocOwner::Module => "module",
            DocOwner::Function => "function",
            DocOwner::Class => "class",
            DocOwner::Item => "item",
        }
    }
}

/// A cleaned doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    /// Comment text with delimiters and indentation removed
    pub text: String,
    /// Line number (1-indexed), 0 for module-level docstrings
    pub line: usize,
    pub owner: DocOwner,
}

/// Extractor trait for inline documentation.
pub trait DocExtractor: Send + Sync {
    /// Extract all doc comments from source code.
    fn extract_docs(&self, source: &[u8]) -> anyhow::Result<Vec<DocComment>>;

    /// Return the language this extractor handles (e.g., "python").
    fn language(&self) -> &str;
}

/// Factory function type for creating extractor instances.
pub type ExtractorFactory = fn() -> Box<dyn DocExtractor>;

lazy_static::lazy_static! {
    /// Global registry mapping file extensions to extractor factories.
    static ref REGISTRY: RwLock<HashMap<String, ExtractorFactory>> = RwLock::new(HashMap::new());
}

/// Register an extractor factory for a file extension.
/// Extension should include the dot (e.g., ".py", ".rs").
pub fn register(ext: &str, factory: ExtractorFactory) {
    let mut registry = REGISTRY.write().unwrap_or_else(|e| e.into_inner());
    registry.insert(ext.to_string(), factory);
}

/// Get an extractor for the given file extension.
/// Returns None if no extractor is registered for the extension.
pub fn for_extension(ext: &str) -> Option<Box<dyn DocExtractor>> {
    let registry = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    registry.get(ext).map(|factory| factory())
}

/// Return all registered file extensions, sorted.
pub fn supported_extensions() -> Vec<String> {
    let registry = REGISTRY.read().unwrap_or_else(|e| e.into_inner());
    let mut exts: Vec<String> = registry.keys().cloned().collect();
    exts.sort();
    exts
}

static INIT: Once = Once::new();

/// Initialize the registry with all available extractors.
/// Registration runs once; later calls return immediately.
#[cfg(feature = "tree-sitter")]
pub fn init() {
    INIT.call_once(languages::register_all);
}

/// Initialize (no-op when tree-sitter is disabled).
#[cfg(not(feature = "tree-sitter"))]
pub fn init() {
    INIT.call_once(|| {});
}

/// Remove common indentation the way Python's `inspect.cleandoc` does.
///
/// The first line is only left-trimmed; the smallest indentation of the
/// remaining non-blank lines is removed from all of them; leading and
/// trailing blank lines are dropped.
pub fn clean_indentation(doc: &str) -> String {
    let expanded = doc.replace('\t', "        ");
    let lines: Vec<&str> = expanded.split('\n').collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    if let Some(first) = lines.first() {
        cleaned.push(first.trim_start().to_string());
    }
    for line in lines.iter().skip(1) {
        let cut = margin.min(line.len() - line.trim_start().len());
        let rest = line.get(cut..).unwrap_or_else(|| line.trim_start());
        cleaned.push(rest.trim_end().to_string());
    }

    while cleaned.last().map(|l| l.trim().is_empty()).unwrap_or(false) {
        cleaned.pop();
    }
    while cleaned.first().map(|l| l.trim().is_empty()).unwrap_or(false) {
        cleaned.remove(0);
    }

    cleaned.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockExtractor;

    impl DocExtractor for MockExtractor {
        fn extract_docs(&self, _source: &[u8]) -> anyhow::Result<Vec<DocComment>> {
            Ok(vec![DocComment {
                text: "Always works.".to_string(),
                line: 1,
                owner: DocOwner::Item,
            }])
        }

        fn language(&self) -> &str {
            "mock"
        }
    }

    fn mock_factory() -> Box<dyn DocExtractor> {
        Box::new(MockExtractor)
    }

    #[test]
    fn test_registry() {
        register(".mockdoc", mock_factory);

        let extractor = for_extension(".mockdoc").expect("registered");
        assert_eq!(extractor.language(), "mock");

        let docs = extractor.extract_docs(b"").unwrap();
        assert_eq!(docs.len(), 1);
        assert!(supported_extensions().contains(&".mockdoc".to_string()));
    }

    #[cfg(feature = "tree-sitter")]
    #[test]
    fn test_init_registers_once() {
        init();
        init();
        assert!(INIT.is_completed());
        assert!(for_extension(".py").is_some());
    }

    #[test]
    fn test_doc_owner_names() {
        assert_eq!(DocOwner::Module.as_str(), "module");
        assert_eq!(DocOwner::Item.as_str(), "item");
    }

    #[test]
    fn test_unregistered_extension() {
        assert!(for_extension(".unknown").is_none());
    }

    #[test]
    fn test_clean_indentation() {
        let doc = "Calculate the sum of two numbers.\n    \n    This function always returns the correct sum.\n    ";
        assert_eq!(
            clean_indentation(doc),
            "Calculate the sum of two numbers.\n\nThis function always returns the correct sum."
        );
    }

    #[test]
    fn test_clean_indentation_keeps_relative_indent() {
        let doc = "\n    Summary.\n\n      indented more\n    back\n";
        assert_eq!(clean_indentation(doc), "Summary.\n\n  indented more\nback");
    }
}
