//! Markdown text unit extraction.
//!
//! Paragraphs, list items and inline code spans become text units in
//! document pre-order: a list item is emitted before the paragraphs it
//! contains, and a paragraph before its code spans. Nested units repeat
//! their children's text. Headings of level 1 to 3 set the section.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser as MdParser, Tag, TagEnd};

use crate::claims::TextUnit;

/// Section used before the first heading.
pub const DEFAULT_SECTION: &str = "General";

/// Units and fenced code blocks of one Markdown document.
#[derive(Debug, Default)]
pub struct MarkdownDoc {
    pub units: Vec<TextUnit>,
    /// Fenced code block bodies, in order of appearance.
    pub code_blocks: Vec<String>,
}

/// An element in pre-order, filled in when its end tag is reached.
enum Entry {
    Heading(String),
    Unit(String),
}

pub fn extract(content: &str, source_file: &str) -> MarkdownDoc {
    let mut entries: Vec<Entry> = Vec::new();
    // Indices into `entries` of elements still collecting text
    let mut open: Vec<usize> = Vec::new();
    let mut code_blocks = Vec::new();
    let mut fenced: Option<String> = None;
    let mut in_indented_block = false;

    for event in MdParser::new(content) {
        match event {
            Event::Start(Tag::Heading { level, .. }) if is_section_level(level) => {
                open.push(entries.len());
                entries.push(Entry::Heading(String::new()));
            }
            Event::Start(Tag::Paragraph) | Event::Start(Tag::Item) => {
                open.push(entries.len());
                entries.push(Entry::Unit(String::new()));
            }
            Event::End(TagEnd::Heading(level)) if is_section_level(level) => {
                open.pop();
            }
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Item) => {
                open.pop();
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_))) => {
                fenced = Some(String::new());
            }
            Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)) => {
                in_indented_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = fenced.take() {
                    code_blocks.push(block);
                }
                in_indented_block = false;
            }
            Event::Text(text) => {
                if let Some(block) = fenced.as_mut() {
                    block.push_str(&text);
                } else if !in_indented_block {
                    append(&mut entries, &open, &text);
                }
            }
            Event::Code(code) => {
                append(&mut entries, &open, &code);
                entries.push(Entry::Unit(code.to_string()));
            }
            Event::SoftBreak | Event::HardBreak => {
                append(&mut entries, &open, "\n");
            }
            _ => {}
        }
    }

    let mut section = DEFAULT_SECTION.to_string();
    let mut units = Vec::new();
    for entry in entries {
        match entry {
            Entry::Heading(text) => section = text,
            Entry::Unit(text) => {
                if !text.trim().is_empty() {
                    units.push(TextUnit::new(text, source_file, 0, section.clone()));
                }
            }
        }
    }

    MarkdownDoc { units, code_blocks }
}

fn is_section_level(level: HeadingLevel) -> bool {
    matches!(level, HeadingLevel::H1 | HeadingLevel::H2 | HeadingLevel::H3)
}

fn append(entries: &mut [Entry], open: &[usize], text: &str) {
    for &idx in open {
        match &mut entries[idx] {
            Entry::Heading(buf) | Entry::Unit(buf) => buf.push_str(text),
        }
    }
}
