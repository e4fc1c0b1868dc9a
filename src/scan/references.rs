//! Backtick code references in documentation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CALL_OR_DOTTED: Regex = Regex::new(r"`(\w+\.\w+|\w+\(\))`").unwrap();
    static ref CLASS_REF: Regex = Regex::new(r"`class\s+(\w+)`|`(\w+)\s+class`").unwrap();
    static ref FILE_REF: Regex = Regex::new(r"`([/\w]+\.\w+)`").unwrap();
}

/// Collect referenced identifiers: dotted names and calls, then classes,
/// then file paths. A file reference like `main.py` also matches the dotted
/// form and is reported twice.
pub fn extract_references(content: &str) -> Vec<String> {
    let mut refs: Vec<String> = CALL_OR_DOTTED
        .captures_iter(content)
        .map(|c| c[1].to_string())
        .collect();

    for caps in CLASS_REF.captures_iter(content) {
        refs.extend(
            [caps.get(1), caps.get(2)]
                .into_iter()
                .flatten()
                .map(|m| m.as_str().to_string()),
        );
    }

    refs.extend(FILE_REF.captures_iter(content).map(|c| c[1].to_string()));
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_kinds_in_group_order() {
        let content = "Use `run()` or the `Engine class`. See `src/engine.rs` and `class Parser`.";
        assert_eq!(
            extract_references(content),
            vec!["run()", "Engine", "Parser", "src/engine.rs"]
        );
    }

    #[test]
    fn test_dotted_file_counted_twice() {
        assert_eq!(extract_references("Edit `main.py`."), vec!["main.py", "main.py"]);
    }

    #[test]
    fn test_no_references() {
        assert!(extract_references("plain `code span with spaces`").is_empty());
    }
}
