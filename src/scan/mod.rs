//! Documentation discovery and claim extraction.
//!
//! The scanner finds documentation files and inline doc comments, splits them
//! into text units and runs every unit through the classifier. Files that
//! cannot be read or parsed are logged and skipped.

pub mod code_blocks;
pub mod markdown;
pub mod references;
pub mod text;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::claims::{extract_claims, ExtractedClaim, TextUnit};
use crate::config::Config;
use crate::error::{log_skipped, read_text, ReadError};
use crate::parser;
use crate::walk::extension;

/// Context given to claims taken from inline doc comments.
pub const DOCSTRING_CONTEXT: &str = "docstring";

/// Documentation file patterns matched at the repository root.
pub const ROOT_DOC_PATTERNS: &[&str] = &[
    "README*",
    "DOCUMENTATION*",
    "GUIDE*",
    "MANUAL*",
    "API*",
    "*.md",
    "*.rst",
    "*.txt",
];

/// Documentation directory patterns matched at any depth.
pub const DIR_DOC_PATTERNS: &[&str] = &["**/docs/**", "**/doc/**", "**/wiki/**"];

/// Extensions never treated as documentation.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "pyc", "class", "o", "so", "dll", "exe", "png", "jpg", "jpeg", "gif", "ico", "pdf", "zip",
    "gz", "tar", "jar", "woff", "woff2",
];

/// Everything a scan produces.
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// Inline doc claims first, then documentation file claims.
    pub claims: Vec<ExtractedClaim>,
    pub documentation_files: Vec<PathBuf>,
    /// Documentation file to the code identifiers it references.
    pub code_references: BTreeMap<String, Vec<String>>,
}

/// Claims and references extracted from a single documentation file.
struct DocumentClaims {
    claims: Vec<ExtractedClaim>,
    references: Vec<String>,
}

/// Scans a repository's documentation.
pub struct DocumentScanner<'a> {
    root: &'a Path,
    config: &'a Config,
    doc_globs: GlobSet,
}

impl<'a> DocumentScanner<'a> {
    pub fn new(root: &'a Path, config: &'a Config) -> anyhow::Result<Self> {
        parser::init();

        let mut builder = GlobSetBuilder::new();
        let patterns = ROOT_DOC_PATTERNS
            .iter()
            .chain(DIR_DOC_PATTERNS)
            .copied()
            .chain(config.doc_patterns.iter().map(String::as_str));
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(true)
                .literal_separator(true)
                .build()?;
            builder.add(glob);
        }

        Ok(Self {
            root,
            config,
            doc_globs: builder.build()?,
        })
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(self.root).unwrap_or(path)
    }

    /// Whether a file is documentation.
    pub fn is_documentation(&self, path: &Path) -> bool {
        let rel = self.relative(path);
        if BINARY_EXTENSIONS.contains(&extension(rel).as_str()) {
            return false;
        }
        if self.config.is_path_excluded(rel) {
            return false;
        }
        self.doc_globs.is_match(rel)
    }

    /// Select documentation files from a repository listing, keeping the
    /// listing order and dropping files that resolve to the same path.
    pub fn find_documentation(&self, files: &[PathBuf]) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        files
            .iter()
            .filter(|path| self.is_documentation(path))
            .filter(|path| {
                let key = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                seen.insert(key)
            })
            .cloned()
            .collect()
    }

    /// Claims from inline doc comments of every supported source file.
    pub fn scan_inline(&self, files: &[PathBuf]) -> Vec<ExtractedClaim> {
        let mut claims = Vec::new();

        for path in files {
            if self.config.is_path_excluded(self.relative(path)) {
                continue;
            }
            let Some(extractor) = parser::for_extension(&format!(".{}", extension(path))) else {
                continue;
            };

            match self.inline_claims(path, extractor.as_ref()) {
                Ok(found) => claims.extend(found),
                Err(err) => log_skipped(&err),
            }
        }

        claims
    }

    fn inline_claims(
        &self,
        path: &Path,
        extractor: &dyn parser::DocExtractor,
    ) -> Result<Vec<ExtractedClaim>, ReadError> {
        let source = read_text(path)?;
        let docs = extractor
            .extract_docs(source.as_bytes())
            .map_err(|e| ReadError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let source_file = path.display().to_string();
        Ok(docs
            .into_iter()
            .flat_map(|doc| {
                tracing::debug!(
                    path = %source_file,
                    line = doc.line,
                    owner = doc.owner.as_str(),
                    "doc comment"
                );
                extract_claims(&TextUnit::new(
                    doc.text,
                    source_file.as_str(),
                    doc.line,
                    DOCSTRING_CONTEXT,
                ))
            })
            .collect())
    }

    fn scan_document(&self, path: &Path) -> Result<DocumentClaims, ReadError> {
        let content = read_text(path)?;
        let source_file = path.display().to_string();

        let claims = match extension(path).as_str() {
            "md" | "markdown" => {
                let doc = markdown::extract(&content, &source_file);
                let mut claims: Vec<ExtractedClaim> =
                    doc.units.iter().flat_map(extract_claims).collect();
                for (index, block) in doc.code_blocks.iter().enumerate() {
                    claims.extend(code_blocks::analyze_example(block, &source_file, index));
                }
                claims
            }
            "rst" => text::rst_units(&content, &source_file)
                .iter()
                .flat_map(extract_claims)
                .collect(),
            _ => text::plain_units(&content, &source_file)
                .iter()
                .flat_map(extract_claims)
                .collect(),
        };

        Ok(DocumentClaims {
            claims,
            references: references::extract_references(&content),
        })
    }

    /// Scan a repository listing.
    pub fn scan(&self, files: &[PathBuf]) -> ScanOutput {
        let mut output = ScanOutput {
            documentation_files: self.find_documentation(files),
            ..Default::default()
        };

        if self.config.scan_inline_docs() {
            output.claims = self.scan_inline(files);
        }

        for path in &output.documentation_files {
            match self.scan_document(path) {
                Ok(doc) => {
                    output.claims.extend(doc.claims);
                    if !doc.references.is_empty() {
                        output
                            .code_references
                            .insert(path.display().to_string(), doc.references);
                    }
                }
                Err(err) => log_skipped(&err),
            }
        }

        tracing::debug!(
            documentation_files = output.documentation_files.len(),
            claims = output.claims.len(),
            "scan complete"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::ClaimType;
    use crate::walk::repo_files;
    use std::fs;
    use tempfile::TempDir;

    fn repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("docs/deep")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("README.md"),
            "# Overview\n\nThe tool supports caching.\n\n```\nrun(1)\n```\n\nSee `cache.get` and `run()`.\n",
        )
        .unwrap();
        fs::write(root.join("docs/deep/guide.rst"), "Intro\n=====\nIt must never fail.\n").unwrap();
        fs::write(root.join("docs/logo.png"), [0u8, 1, 2]).unwrap();
        fs::write(root.join("src/notes.txt"), "It always works.\n").unwrap();
        fs::write(root.join("CHANGES.TXT"), "Now handles 10 requests\n").unwrap();
        temp
    }

    #[test]
    fn test_find_documentation() {
        let temp = repo();
        let config = Config::default();
        let scanner = DocumentScanner::new(temp.path(), &config).unwrap();
        let files = repo_files(temp.path()).unwrap();

        let docs: Vec<PathBuf> = scanner
            .find_documentation(&files)
            .into_iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            docs,
            vec![
                PathBuf::from("CHANGES.TXT"),
                PathBuf::from("README.md"),
                PathBuf::from("docs/deep/guide.rst"),
            ]
        );
    }

    #[test]
    fn test_configured_patterns_and_exclusions() {
        let temp = repo();
        let config = Config {
            doc_patterns: vec!["src/*.txt".to_string()],
            excluded_paths: vec!["docs/**".to_string()],
            ..Default::default()
        };
        let scanner = DocumentScanner::new(temp.path(), &config).unwrap();

        assert!(scanner.is_documentation(&temp.path().join("src/notes.txt")));
        assert!(!scanner.is_documentation(&temp.path().join("docs/deep/guide.rst")));
    }

    #[test]
    fn test_scan_collects_claims_and_references() {
        let temp = repo();
        let config = Config::default();
        let scanner = DocumentScanner::new(temp.path(), &config).unwrap();
        let files = repo_files(temp.path()).unwrap();

        let output = scanner.scan(&files);

        assert!(output
            .claims
            .iter()
            .any(|c| c.claim_type == ClaimType::Feature && c.text == "caching." && c.context == "Overview"));
        assert!(output
            .claims
            .iter()
            .any(|c| c.text == "Function 'run' exists and can be called" && c.context == "code_example_0"));
        assert!(output
            .claims
            .iter()
            .any(|c| c.claim_type == ClaimType::Behavior && c.line_number == 3 && c.context == "Intro"));

        let readme = temp.path().join("README.md").display().to_string();
        assert_eq!(output.code_references.get(&readme), Some(&vec!["cache.get".to_string(), "run()".to_string()]));
        assert_eq!(output.code_references.len(), 1);
    }

    #[test]
    fn test_undecodable_document_is_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), [0xffu8, 0xfe, 0x80]).unwrap();
        fs::write(temp.path().join("GUIDE.txt"), "It must work.\n").unwrap();

        let config = Config::default();
        let scanner = DocumentScanner::new(temp.path(), &config).unwrap();
        let output = scanner.scan(&repo_files(temp.path()).unwrap());

        assert_eq!(output.documentation_files.len(), 2);
        assert!(!output.claims.is_empty());
        assert!(output.claims.iter().all(|c| c.source_file.ends_with("GUIDE.txt")));
    }

    #[cfg(feature = "tree-sitter")]
    #[test]
    fn test_inline_docstrings_come_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "It always works.\n").unwrap();
        fs::write(
            temp.path().join("main.py"),
            "def f():\n    \"\"\"This function always returns the correct sum.\"\"\"\n    return 1\n",
        )
        .unwrap();

        let config = Config::default();
        let scanner = DocumentScanner::new(temp.path(), &config).unwrap();
        let output = scanner.scan(&repo_files(temp.path()).unwrap());

        assert_eq!(output.claims[0].context, DOCSTRING_CONTEXT);
        assert_eq!(output.claims[0].line_number, 1);
        assert!(output.claims.last().unwrap().source_file.ends_with("README.md"));

        let disabled = Config {
            inline_docs: Some(false),
            ..Default::default()
        };
        let scanner = DocumentScanner::new(temp.path(), &disabled).unwrap();
        let output = scanner.scan(&repo_files(temp.path()).unwrap());
        assert!(output.claims.iter().all(|c| c.context != DOCSTRING_CONTEXT));
    }
}
