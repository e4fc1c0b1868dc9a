//! Claim types and the classification stage of the pipeline.
//!
//! A claim moves through three immutable stages:
//!
//! ```text
//! ExtractedClaim ──correlate──▶ CorrelatedClaim ──assign_strategy──▶ Claim
//! ```
//!
//! Each stage consumes the previous one by value, so nothing downstream can
//! observe a half-enriched claim.

mod confidence;
mod patterns;

pub use confidence::{score as score_confidence, CODE_EXAMPLE_CONFIDENCE, HIGH_CONFIDENCE};
pub use patterns::{classify, extract_claims, ClaimMatch, ClaimPattern, TextUnit, CLAIM_PATTERNS};

use serde::{Deserialize, Serialize};

/// Category of an extracted claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Feature,
    Performance,
    Security,
    Api,
    Behavior,
}

impl ClaimType {
    /// All claim types, in classification order.
    pub const ALL: [ClaimType; 5] = [
        ClaimType::Feature,
        ClaimType::Performance,
        ClaimType::Security,
        ClaimType::Api,
        ClaimType::Behavior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Feature => "feature",
            ClaimType::Performance => "performance",
            ClaimType::Security => "security",
            ClaimType::Api => "api",
            ClaimType::Behavior => "behavior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "feature" => Some(ClaimType::Feature),
            "performance" => Some(ClaimType::Performance),
            "security" => Some(ClaimType::Security),
            "api" => Some(ClaimType::Api),
            "behavior" => Some(ClaimType::Behavior),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClaimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Testing strategy appropriate for a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    UnitTest,
    Benchmark,
    SecurityTest,
    IntegrationTest,
    PropertyTest,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::UnitTest => "unit_test",
            VerificationMethod::Benchmark => "benchmark",
            VerificationMethod::SecurityTest => "security_test",
            VerificationMethod::IntegrationTest => "integration_test",
            VerificationMethod::PropertyTest => "property_test",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unit_test" => Some(VerificationMethod::UnitTest),
            "benchmark" => Some(VerificationMethod::Benchmark),
            "security_test" => Some(VerificationMethod::SecurityTest),
            "integration_test" => Some(VerificationMethod::IntegrationTest),
            "property_test" => Some(VerificationMethod::PropertyTest),
            _ => None,
        }
    }
}

impl std::fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A claim as it comes out of the scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClaim {
    pub text: String,
    pub source_file: String,
    /// 1-indexed line, 0 when the source format loses line information.
    pub line_number: usize,
    pub claim_type: ClaimType,
    pub confidence: f64,
    pub context: String,
}

impl ExtractedClaim {
    /// Attach code evidence found by the correlator.
    pub fn correlate(self, related_code: Vec<String>) -> CorrelatedClaim {
        CorrelatedClaim {
            claim: self,
            related_code,
        }
    }
}

/// A claim with its code evidence attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedClaim {
    pub claim: ExtractedClaim,
    pub related_code: Vec<String>,
}

/// A fully processed claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    pub source_file: String,
    pub line_number: usize,
    pub claim_type: ClaimType,
    pub confidence: f64,
    pub context: String,
    pub verifiable: bool,
    #[serde(with = "method_or_empty")]
    pub verification_method: Option<VerificationMethod>,
    pub related_code: Vec<String>,
}

impl Claim {
    /// Whether the claim reaches the given confidence threshold.
    pub fn is_high_confidence(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }
}

/// Serializes an unset verification method as `""`.
pub(crate) mod method_or_empty {
    use super::VerificationMethod;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        method: &Option<VerificationMethod>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(method.map(|m| m.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<VerificationMethod>, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(VerificationMethod::parse(&s))
    }
}
