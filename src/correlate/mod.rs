//! Correlation of claims with source code.
//!
//! Source files are read once into a [`SourceIndex`]; every claim is then
//! matched against the index according to its type.

pub mod definitions;

use std::collections::HashSet;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;

use crate::claims::{ClaimType, CorrelatedClaim, ExtractedClaim};
use crate::error::{log_skipped, read_text};
use crate::walk::extension;

use definitions::{DefinitionKind, Family};

/// Feature keywords considered per claim.
pub const MAX_FEATURE_KEYWORDS: usize = 3;

/// Words too common to identify a feature.
pub const FEATURE_STOP_WORDS: &[&str] = &["that", "this", "with", "from", "have"];

/// Keywords linking a security claim to code.
pub const SECURITY_KEYWORDS: &[&str] = &[
    "auth", "encrypt", "decrypt", "validate", "sanitize", "token", "password", "hash", "salt",
    "verify", "secure",
];

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b(\w+)\b").unwrap();
    static ref LONG_WORD: Regex = Regex::new(r"\b(\w{4,})\b").unwrap();
}

/// One indexed source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: String,
    /// Lowercased file content
    pub content: String,
    pub definitions: HashSet<String>,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: &str, family: Family) -> Self {
        let path = path.into();
        let found = definitions::extract(content, family);
        let classes = found
            .iter()
            .filter(|d| d.kind == DefinitionKind::Class)
            .count();
        tracing::debug!(
            path = %path,
            functions = found.len() - classes,
            classes = classes,
            "indexed source file"
        );

        Self {
            path,
            content: content.to_lowercase(),
            definitions: found.into_iter().map(|d| d.name).collect(),
        }
    }
}

/// Contents and definitions of every indexed source file, in walk order.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    files: Vec<SourceFile>,
}

impl SourceIndex {
    /// Index every file of a supported family. Unreadable files are skipped.
    pub fn build(paths: &[PathBuf]) -> Self {
        let mut files = Vec::new();

        for path in paths {
            let Some(family) = Family::from_extension(&extension(path)) else {
                continue;
            };
            match read_text(path) {
                Ok(content) => files.push(SourceFile::new(path.display().to_string(), &content, family)),
                Err(err) => log_skipped(&err),
            }
        }

        tracing::debug!(files = files.len(), "source index built");
        Self { files }
    }

    pub fn from_files(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Every file defining `name` as a function or class.
    pub fn defining<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.files
            .iter()
            .filter(move |f| f.definitions.contains(name))
            .map(|f| f.path.as_str())
    }

    /// First file whose lowercased content contains `keyword`.
    pub fn first_containing(&self, keyword: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.content.contains(keyword))
            .map(|f| f.path.as_str())
    }
}

/// Up to three lowercase keywords of four or more characters.
pub fn feature_keywords(text: &str) -> Vec<String> {
    LONG_WORD
        .captures_iter(text)
        .map(|c| c[1].to_lowercase())
        .filter(|w| !FEATURE_STOP_WORDS.contains(&w.as_str()))
        .take(MAX_FEATURE_KEYWORDS)
        .collect()
}

/// Find code related to a claim. Order follows the claim's tokens, with
/// duplicates kept.
pub fn related_code(claim: &ExtractedClaim, index: &SourceIndex) -> Vec<String> {
    match claim.claim_type {
        ClaimType::Api => WORD
            .captures_iter(&claim.text)
            .flat_map(|c| {
                let name = c[1].to_string();
                index
                    .defining(&name)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect(),
        ClaimType::Feature => feature_keywords(&claim.text)
            .iter()
            .filter_map(|k| index.first_containing(k))
            .map(str::to_string)
            .collect(),
        ClaimType::Security => {
            let lower = claim.text.to_lowercase();
            SECURITY_KEYWORDS
                .iter()
                .filter(|k| lower.contains(*k))
                .filter_map(|k| index.first_containing(k))
                .map(str::to_string)
                .collect()
        }
        ClaimType::Performance | ClaimType::Behavior => Vec::new(),
    }
}

/// Attach related code to a claim.
pub fn correlate(claim: ExtractedClaim, index: &SourceIndex) -> CorrelatedClaim {
    let related = related_code(&claim, index);
    claim.correlate(related)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(text: &str, claim_type: ClaimType) -> ExtractedClaim {
        ExtractedClaim {
            text: text.to_string(),
            source_file: "README.md".to_string(),
            line_number: 0,
            claim_type,
            confidence: 0.5,
            context: "General".to_string(),
        }
    }

    fn index() -> SourceIndex {
        SourceIndex::from_files(vec![
            SourceFile::new(
                "repo/main.py",
                "def calculate_sum(a, b):\n    return a + b\n\nclass Calculator:\n    pass\n",
                Family::Python,
            ),
            SourceFile::new(
                "repo/auth.py",
                "def login(user, password):\n    return hash_password(password)\n",
                Family::Python,
            ),
            SourceFile::new(
                "repo/lib/sum.js",
                "function calculate_sum(a, b) { return a + b }\n",
                Family::JavaScript,
            ),
        ])
    }

    #[test]
    fn test_api_claim_finds_every_defining_file() {
        let related = related_code(
            &claim("Function 'calculate_sum' exists and can be called", ClaimType::Api),
            &index(),
        );
        assert_eq!(related, vec!["repo/main.py", "repo/lib/sum.js"]);
    }

    #[test]
    fn test_api_claim_without_definition() {
        let related = related_code(
            &claim("Function 'nonexistent_function' exists and can be called", ClaimType::Api),
            &index(),
        );
        assert!(related.is_empty());
    }

    #[test]
    fn test_api_claim_duplicates_kept() {
        let related = related_code(&claim("Calculator or Calculator", ClaimType::Api), &index());
        assert_eq!(related, vec!["repo/main.py", "repo/main.py"]);
    }

    #[test]
    fn test_feature_keywords() {
        assert_eq!(
            feature_keywords("This supports caching with Redis backends and more"),
            vec!["supports", "caching", "redis"]
        );
        assert!(feature_keywords("a bit of it").is_empty());
    }

    #[test]
    fn test_feature_claim_first_file_per_keyword() {
        let related = related_code(&claim("calculate sums quickly", ClaimType::Feature), &index());
        // "calculate" is in main.py first, "sums" and "quickly" match nothing
        assert_eq!(related, vec!["repo/main.py"]);
    }

    #[test]
    fn test_security_claim_keywords() {
        let related = related_code(
            &claim("Passwords are hashed before storage", ClaimType::Security),
            &index(),
        );
        // "password" and "hash" both live in auth.py
        assert_eq!(related, vec!["repo/auth.py", "repo/auth.py"]);
    }

    #[test]
    fn test_uncorrelated_types() {
        let index = index();
        assert!(related_code(&claim("calculate_sum always works", ClaimType::Behavior), &index).is_empty());
        assert!(related_code(&claim("calculate_sum is fast", ClaimType::Performance), &index).is_empty());
    }

    #[test]
    fn test_build_skips_unsupported_and_unreadable() {
        let temp = tempfile::TempDir::new().unwrap();
        let py = temp.path().join("a.py");
        let rs = temp.path().join("b.rs");
        let bad = temp.path().join("c.go");
        std::fs::write(&py, "def a():\n    pass\n").unwrap();
        std::fs::write(&rs, "fn b() {}\n").unwrap();
        std::fs::write(&bad, [0xffu8, 0xfe]).unwrap();

        let index = SourceIndex::build(&[py.clone(), rs, bad]);
        assert_eq!(index.len(), 1);
        let defining: Vec<&str> = index.defining("a").collect();
        assert_eq!(defining, vec![py.display().to_string()]);
        assert_eq!(index.defining("b").count(), 0);
    }
}
