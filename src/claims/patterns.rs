//! Pattern-based claim classification.
//!
//! Each claim type owns an ordered list of case-insensitive regexes. Every
//! non-overlapping match of every pattern becomes one claim, so a single
//! sentence can surface under several types. Overlaps are kept on purpose:
//! precision is left to the confidence scorer and the verifier.

use lazy_static::lazy_static;
use regex::Regex;

use super::{confidence, ClaimType, ExtractedClaim};

/// A compiled classification pattern.
pub struct ClaimPattern {
    pub claim_type: ClaimType,
    pub regex: Regex,
    /// Capture group holding the claim detail.
    pub detail_group: usize,
}

impl ClaimPattern {
    fn new(claim_type: ClaimType, pattern: &str, detail_group: usize) -> Self {
        Self {
            claim_type,
            regex: Regex::new(pattern).unwrap(),
            detail_group,
        }
    }
}

lazy_static! {
    /// Classification table, in claim-type then pattern order.
    pub static ref CLAIM_PATTERNS: Vec<ClaimPattern> = vec![
        // Feature
        ClaimPattern::new(
            ClaimType::Feature,
            r"(?i)(supports?|provides?|enables?|allows?|implements?|offers?)\s+(.+)",
            2,
        ),
        ClaimPattern::new(ClaimType::Feature, r"(?i)(can|will|does)\s+(.+)", 2),
        ClaimPattern::new(
            ClaimType::Feature,
            r"(?i)(feature[s]?|functionality|capability)[:]\s*(.+)",
            2,
        ),

        // Performance
        ClaimPattern::new(
            ClaimType::Performance,
            r"(?i)(fast|quick|efficient|optimized|performance)\s+(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Performance,
            r"(?i)(\d+[x]?\s*faster|slower)\s+than\s+(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Performance,
            r"(?i)(handles?|processes?|supports?)\s+(\d+\s*(?:requests?|operations?|items?))",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Performance,
            r"(?i)(latency|throughput|response time)[:]\s*(.+)",
            2,
        ),

        // Security
        ClaimPattern::new(
            ClaimType::Security,
            r"(?i)(secure|encrypted|authenticated|authorized|protected)\s+(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Security,
            r"(?i)(prevents?|blocks?|validates?|sanitizes?)\s+(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Security,
            r"(?i)(vulnerability|threat|attack|exploit)\s+(.+)",
            2,
        ),

        // API
        ClaimPattern::new(
            ClaimType::Api,
            r"(?i)(api|endpoint|method|function|class)\s*[:]\s*(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Api,
            r"(?i)(returns?|accepts?|expects?|requires?)\s+(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Api,
            r"(?i)(parameter[s]?|argument[s]?|input[s]?|output[s]?)[:]\s*(.+)",
            2,
        ),

        // Behavior
        ClaimPattern::new(
            ClaimType::Behavior,
            r"(?i)(always|never|must|should|shall)\s+(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Behavior,
            r"(?i)(guaranteed|ensures?|maintains?)\s+(.+)",
            2,
        ),
        ClaimPattern::new(
            ClaimType::Behavior,
            r"(?i)(default[s]?\s+to|behavior[s]?|action[s]?)[:]\s*(.+)",
            2,
        ),
    ];
}

/// A snippet of documentation handed to the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub text: String,
    pub source_file: String,
    pub line_number: usize,
    pub context: String,
}

impl TextUnit {
    pub fn new(
        text: impl Into<String>,
        source_file: impl Into<String>,
        line_number: usize,
        context: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_file: source_file.into(),
            line_number,
            context: context.into(),
        }
    }
}

/// One classifier hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimMatch {
    pub claim_type: ClaimType,
    /// The detail clause, untrimmed.
    pub detail: String,
    /// The whole matched span, including the trigger word.
    pub matched: String,
}

/// Classify a text into typed matches, in claim-type then pattern order.
pub fn classify(text: &str) -> Vec<ClaimMatch> {
    let mut found = Vec::new();

    for pattern in CLAIM_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(text) {
            let matched = caps.get(0).map(|m| m.as_str()).unwrap_or("");
            let detail = caps
                .get(pattern.detail_group)
                .or_else(|| caps.get(1))
                .map(|m| m.as_str())
                .unwrap_or("");
            found.push(ClaimMatch {
                claim_type: pattern.claim_type,
                detail: detail.to_string(),
                matched: matched.to_string(),
            });
        }
    }

    found
}

/// Classify a text unit and score every hit.
///
/// The score is computed over the whole matched span so the trigger word
/// ("always", "might", ...) counts toward the claim it introduces.
pub fn extract_claims(unit: &TextUnit) -> Vec<ExtractedClaim> {
    classify(&unit.text)
        .into_iter()
        .map(|m| ExtractedClaim {
            confidence: confidence::score(&m.matched, m.claim_type),
            text: m.detail.trim().to_string(),
            source_file: unit.source_file.clone(),
            line_number: unit.line_number,
            claim_type: m.claim_type,
            context: unit.context.clone(),
        })
        .collect()
}
