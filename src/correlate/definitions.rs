//! Regex-based extraction of function and class definitions.
//!
//! Each language family has its own line patterns. Matching is line by line,
//! so definitions whose signature spans several lines are only found when the
//! name and opening parenthesis share a line.

use lazy_static::lazy_static;
use regex::Regex;

/// Kind of a defined symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Function,
    Class,
}

/// A definition found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub kind: DefinitionKind,
}

/// Source language families with distinct definition syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Python,
    JavaScript,
    Java,
    Cpp,
    Go,
}

impl Family {
    /// Family for a lowercase extension, if it is indexed.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "py" => Some(Family::Python),
            "js" | "ts" => Some(Family::JavaScript),
            "java" => Some(Family::Java),
            "cpp" => Some(Family::Cpp),
            "go" => Some(Family::Go),
            _ => None,
        }
    }
}

/// Words that look like a callee name in a statement header.
const CONTROL_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "new", "else", "sizeof", "delete",
];

lazy_static! {
    static ref PY_FUNC: Regex = Regex::new(r"^\s*(?:async\s+)?def\s+(\w+)\s*\(").unwrap();
    static ref PY_CLASS: Regex = Regex::new(r"^\s*class\s+(\w+)\s*[\(:]").unwrap();

    static ref JS_FUNC: Regex = Regex::new(r"\bfunction\s*\*?\s+(\w+)\s*\(").unwrap();
    static ref JS_CLASS: Regex =
        Regex::new(r"\bclass\s+(\w+)(?:\s+extends\s+[\w.]+)?\s*\{").unwrap();

    static ref JAVA_TYPE: Regex = Regex::new(r"\b(?:class|interface|enum)\s+(\w+)").unwrap();
    static ref JAVA_METHOD: Regex =
        Regex::new(r"^\s*(?:[\w<>\[\],]+\s+)+(\w+)\s*\([^)]*\)\s*(?:throws\s+[\w.,\s]+)?\{").unwrap();

    static ref CPP_TYPE: Regex = Regex::new(r"\b(?:class|struct)\s+(\w+)").unwrap();
    static ref CPP_FUNC: Regex =
        Regex::new(r"^\s*(?:[\w:<>,]+[\s\*&]+)+(?:\w+::)*(\w+)\s*\([^)]*\)\s*(?:const\s*)?\{").unwrap();

    static ref GO_FUNC: Regex = Regex::new(r"^func\s+(?:\([^)]+\)\s+)?(\w+)\s*[\(\[]").unwrap();
    static ref GO_TYPE: Regex = Regex::new(r"^type\s+(\w+)\s+(?:struct|interface)\b").unwrap();
}

/// Extract definitions from source text of the given family.
pub fn extract(content: &str, family: Family) -> Vec<Definition> {
    let (functions, classes): (&Regex, &Regex) = match family {
        Family::Python => (&PY_FUNC, &PY_CLASS),
        Family::JavaScript => (&JS_FUNC, &JS_CLASS),
        Family::Java => (&JAVA_METHOD, &JAVA_TYPE),
        Family::Cpp => (&CPP_FUNC, &CPP_TYPE),
        Family::Go => (&GO_FUNC, &GO_TYPE),
    };

    let mut definitions = Vec::new();

    for line in content.lines() {
        for caps in functions.captures_iter(line) {
            let name = &caps[1];
            if CONTROL_KEYWORDS.contains(&name) {
                continue;
            }
            definitions.push(Definition {
                name: name.to_string(),
                kind: DefinitionKind::Function,
            });
        }

        for caps in classes.captures_iter(line) {
            definitions.push(Definition {
                name: caps[1].to_string(),
                kind: DefinitionKind::Class,
            });
        }
    }

    definitions
}
