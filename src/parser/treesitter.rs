//! Tree-sitter based doc comment extraction.
//!
//! A generic extractor for languages whose doc comments are ordinary comments
//! marked by a prefix (`///`, `/**`, ...). Languages are configured via a
//! comment query and their doc prefixes.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser as TsParser, Query, QueryCursor};

use super::{clean_indentation, DocComment, DocExtractor, DocOwner};

/// Configuration for a comment-based doc extractor.
#[derive(Clone)]
pub struct Config {
    /// The tree-sitter language
    pub language: Language,
    /// Language name (e.g., "rust", "java")
    pub language_name: &'static str,
    /// Tree-sitter query capturing comment nodes as `@comment`
    pub comment_query: &'static str,
    /// Prefixes of single-line doc comments; consecutive lines are merged
    pub line_prefixes: &'static [&'static str],
    /// Prefixes of block doc comments (closed by `*/`)
    pub block_prefixes: &'static [&'static str],
    /// Prefixes that look like doc comments but are not (e.g., `////`)
    pub excluded_prefixes: &'static [&'static str],
}

/// Tree-sitter based comment doc extractor.
pub struct CommentDocExtractor {
    config: Config,
}

/// A comment node's text and position.
struct RawComment {
    text: String,
    start_row: usize,
}

impl CommentDocExtractor {
    /// Create a new extractor with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parse source code and return the tree.
    fn parse(&self, source: &[u8]) -> anyhow::Result<tree_sitter::Tree> {
        let mut parser = TsParser::new();
        parser.set_language(&self.config.language)?;
        parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse source"))
    }

    /// Collect comment nodes in source order.
    fn comments(&self, source: &[u8]) -> anyhow::Result<Vec<RawComment>> {
        let tree = self.parse(source)?;
        let query = Query::new(&self.config.language, self.config.comment_query)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source);

        let mut comments = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                let text = capture.node.utf8_text(source).unwrap_or("");
                if text.is_empty() {
                    continue;
                }
                comments.push(RawComment {
                    text: text.to_string(),
                    start_row: capture.node.start_position().row,
                });
            }
        }

        comments.sort_by_key(|c| c.start_row);
        Ok(comments)
    }

    fn line_prefix(&self, text: &str) -> Option<&'static str> {
        if self.is_excluded(text) {
            return None;
        }
        self.config
            .line_prefixes
            .iter()
            .copied()
            .find(|p| text.starts_with(p))
    }

    fn block_prefix(&self, text: &str) -> Option<&'static str> {
        if self.is_excluded(text) || text.starts_with("/**/") {
            return None;
        }
        self.config
            .block_prefixes
            .iter()
            .copied()
            .find(|p| text.starts_with(p))
    }

    fn is_excluded(&self, text: &str) -> bool {
        self.config
            .excluded_prefixes
            .iter()
            .any(|p| text.starts_with(p))
    }
}

impl DocExtractor for CommentDocExtractor {
    fn extract_docs(&self, source: &[u8]) -> anyhow::Result<Vec<DocComment>> {
        let comments = self.comments(source)?;
        let mut docs = Vec::new();

        // Pending run of consecutive line doc comments: (first row, last row, lines)
        let mut run: Option<(usize, usize, Vec<String>)> = None;

        for comment in comments {
            let text = comment.text.trim_end();

            if let Some(prefix) = self.line_prefix(text) {
                let line = strip_one_space(&text[prefix.len()..]).to_string();
                match run.as_mut() {
                    Some((_, last, lines)) if comment.start_row == *last + 1 => {
                        lines.push(line);
                        *last = comment.start_row;
                    }
                    _ => {
                        if let Some(done) = run.take() {
                            docs.extend(finish_run(done));
                        }
                        run = Some((comment.start_row, comment.start_row, vec![line]));
                    }
                }
                continue;
            }

            if let Some(done) = run.take() {
                docs.extend(finish_run(done));
            }

            if let Some(prefix) = self.block_prefix(text) {
                let body = strip_block(text, prefix);
                if !body.is_empty() {
                    docs.push(DocComment {
                        text: body,
                        line: comment.start_row + 1,
                        owner: DocOwner::Item,
                    });
                }
            }
        }

        if let Some(done) = run.take() {
            docs.extend(finish_run(done));
        }

        Ok(docs)
    }

    fn language(&self) -> &str {
        self.config.language_name
    }
}

fn finish_run((first, _, lines): (usize, usize, Vec<String>)) -> Option<DocComment> {
    let text = clean_indentation(&lines.join("\n"));
    if text.is_empty() {
        return None;
    }
    Some(DocComment {
        text,
        line: first + 1,
        owner: DocOwner::Item,
    })
}

fn strip_one_space(s: &str) -> &str {
    s.strip_prefix(' ').unwrap_or(s)
}

/// Strip `/** ... */` delimiters and the leading `*` gutter of each line.
fn strip_block(text: &str, prefix: &str) -> String {
    let inner = text[prefix.len()..].trim_end();
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let t = line.trim_start();
            match t.strip_prefix('*') {
                Some(rest) => strip_one_space(rest),
                None => t,
            }
        })
        .collect();

    clean_indentation(&lines.join("\n"))
}
