//! Line-based extraction for reStructuredText and plain text.

use crate::claims::TextUnit;

use super::markdown::DEFAULT_SECTION;

/// Characters an RST section underline may consist of.
const UNDERLINE_CHARS: &[char] = &['=', '-', '~'];

fn is_underline(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| UNDERLINE_CHARS.contains(&c))
}

/// Split RST into units. A line followed by an underline becomes the
/// current section instead of a unit.
pub fn rst_units(content: &str, source_file: &str) -> Vec<TextUnit> {
    let lines: Vec<&str> = content.lines().collect();
    let mut section = DEFAULT_SECTION.to_string();
    let mut units = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if lines.get(i + 1).is_some_and(|next| is_underline(next)) {
            section = line.trim().to_string();
        } else if !line.trim().is_empty() {
            units.push(TextUnit::new(*line, source_file, i + 1, section.clone()));
        }
    }

    units
}

/// Every non-blank line is a unit in the default section.
pub fn plain_units(content: &str, source_file: &str) -> Vec<TextUnit> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| TextUnit::new(line, source_file, i + 1, DEFAULT_SECTION))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rst_sections() {
        let rst = "Guide\n=====\n\nThe parser must reject tabs.\n\nSecurity\n--------\nTokens are encrypted at rest.\n";
        let units = rst_units(rst, "docs/guide.rst");

        let summary: Vec<(&str, usize, &str)> = units
            .iter()
            .map(|u| (u.text.as_str(), u.line_number, u.context.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("=====", 2, "Guide"),
                ("The parser must reject tabs.", 4, "Guide"),
                ("--------", 7, "Security"),
                ("Tokens are encrypted at rest.", 8, "Security"),
            ]
        );
    }

    #[test]
    fn test_plain_units_skip_blank_lines() {
        let units = plain_units("first\n\n   \nthird line\n", "NOTES.txt");
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].text, "third line");
        assert_eq!(units[1].line_number, 4);
        assert_eq!(units[1].context, "General");
    }

    #[test]
    fn test_underline_detection() {
        assert!(is_underline("  ~~~~ "));
        assert!(!is_underline(""));
        assert!(!is_underline("=a="));
    }
}
