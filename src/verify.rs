//! Claim verification against a repository.
//!
//! The verifier re-derives a status for each claim record from its
//! verification method (or, failing that, its claim type) and correlated
//! code. It never trusts the record's own idea of whether it was verified.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::claims::{Claim, ClaimType, VerificationMethod};
use crate::strategy::method_for;
use crate::walk::repo_files;

/// File name fragments that suggest a benchmark, in lookup order.
pub const BENCHMARK_PATTERNS: &[&str] = &["benchmark", "perf", "performance", "bench"];

/// Claim type reported when a record carries none.
pub const UNKNOWN_TYPE: &str = "unknown";

/// A claim as handed to the verifier, typically deserialized from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub text: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub claim_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<String>,
    #[serde(default)]
    pub related_code: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifiable: Option<bool>,
}

impl ClaimRecord {
    /// Parsed verification method. Unknown names count as unset.
    pub fn method(&self) -> Option<VerificationMethod> {
        self.verification_method
            .as_deref()
            .and_then(VerificationMethod::parse)
    }

    /// Parsed claim type. Unknown names count as unset.
    pub fn parsed_type(&self) -> Option<ClaimType> {
        self.claim_type.as_deref().and_then(ClaimType::parse)
    }

    /// Method used for verification: the record's own method, else the one
    /// assigned to its claim type.
    pub fn effective_method(&self) -> Option<VerificationMethod> {
        self.method()
            .or_else(|| self.parsed_type().map(|t| method_for(t).0))
    }
}

impl From<&Claim> for ClaimRecord {
    fn from(claim: &Claim) -> Self {
        Self {
            text: claim.text.clone(),
            claim_type: Some(claim.claim_type.as_str().to_string()),
            verification_method: claim.verification_method.map(|m| m.as_str().to_string()),
            related_code: claim.related_code.clone(),
            verifiable: Some(claim.verifiable),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    Failed,
    Inconclusive,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "verified",
            VerificationStatus::Failed => "failed",
            VerificationStatus::Inconclusive => "inconclusive",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub claim: String,
    #[serde(rename = "type")]
    pub claim_type: String,
    pub status: VerificationStatus,
    pub evidence: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub total_claims: usize,
    pub verified: usize,
    pub failed: usize,
    pub inconclusive: usize,
    /// Percentage of verified claims, 0 when there are none.
    pub verification_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub verified: Vec<VerificationResult>,
    pub failed: Vec<VerificationResult>,
    pub inconclusive: Vec<VerificationResult>,
    pub summary: VerificationSummary,
}

/// Status, evidence line and confidence of one verification.
struct Outcome {
    status: VerificationStatus,
    evidence: String,
    confidence: f64,
}

impl Outcome {
    fn new(status: VerificationStatus, evidence: impl Into<String>, confidence: f64) -> Self {
        Self {
            status,
            evidence: evidence.into(),
            confidence,
        }
    }
}

type Handler = fn(&ClaimVerifier, &ClaimRecord) -> Outcome;

/// Handler for a verification method. Unset methods fall through to the
/// general handler.
fn handler_for(method: Option<VerificationMethod>) -> Handler {
    match method {
        Some(VerificationMethod::UnitTest) => ClaimVerifier::verify_api,
        Some(VerificationMethod::Benchmark) => ClaimVerifier::verify_performance,
        Some(VerificationMethod::SecurityTest) => ClaimVerifier::verify_security,
        Some(VerificationMethod::IntegrationTest)
        | Some(VerificationMethod::PropertyTest)
        | None => ClaimVerifier::verify_general,
    }
}

/// Verifies claims against a repository.
pub struct ClaimVerifier {
    root: PathBuf,
    /// First benchmark-like file, looked up on first use.
    benchmark: OnceCell<Option<String>>,
    results: Vec<VerificationResult>,
}

impl ClaimVerifier {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            benchmark: OnceCell::new(),
            results: Vec::new(),
        }
    }

    /// Verify every record and partition the results by status.
    pub fn verify_claims(&mut self, claims: &[ClaimRecord]) -> VerificationReport {
        let mut report = VerificationReport::default();

        for claim in claims {
            let result = self.verify_claim(claim);
            match result.status {
                VerificationStatus::Verified => report.verified.push(result.clone()),
                VerificationStatus::Failed => report.failed.push(result.clone()),
                VerificationStatus::Inconclusive => report.inconclusive.push(result.clone()),
            }
            self.results.push(result);
        }

        let total = claims.len();
        report.summary = VerificationSummary {
            total_claims: total,
            verified: report.verified.len(),
            failed: report.failed.len(),
            inconclusive: report.inconclusive.len(),
            verification_rate: if total > 0 {
                report.verified.len() as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        };

        tracing::info!(
            total = total,
            verified = report.summary.verified,
            failed = report.summary.failed,
            "verification complete"
        );
        report
    }

    /// Verify a single record. A record marked unverifiable is never
    /// verified: the unit test check is replaced by the general one.
    pub fn verify_claim(&self, claim: &ClaimRecord) -> VerificationResult {
        let method = claim.effective_method();
        let handler = match method {
            Some(VerificationMethod::UnitTest) if claim.verifiable == Some(false) => {
                ClaimVerifier::verify_general
            }
            _ => handler_for(method),
        };
        let outcome = handler(self, claim);

        VerificationResult {
            claim: claim.text.clone(),
            claim_type: claim
                .claim_type
                .clone()
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
            status: outcome.status,
            evidence: vec![outcome.evidence],
            confidence: outcome.confidence,
        }
    }

    /// Every result produced by this verifier, across calls.
    pub fn results(&self) -> &[VerificationResult] {
        &self.results
    }

    fn verify_api(&self, claim: &ClaimRecord) -> Outcome {
        if claim.related_code.is_empty() {
            Outcome::new(
                VerificationStatus::Failed,
                "No implementation found for claimed API",
                0.9,
            )
        } else {
            Outcome::new(
                VerificationStatus::Verified,
                format!("Found implementation in {} files", claim.related_code.len()),
                0.8,
            )
        }
    }

    fn verify_performance(&self, _claim: &ClaimRecord) -> Outcome {
        match self.benchmark_file() {
            Some(path) => Outcome::new(
                VerificationStatus::Inconclusive,
                format!("Found potential benchmark: {}", path),
                0.5,
            ),
            None => Outcome::new(
                VerificationStatus::Inconclusive,
                "No benchmarks found to verify performance claim",
                0.3,
            ),
        }
    }

    fn verify_security(&self, _claim: &ClaimRecord) -> Outcome {
        Outcome::new(
            VerificationStatus::Inconclusive,
            "Security verification requires dedicated security analysis",
            0.4,
        )
    }

    fn verify_general(&self, claim: &ClaimRecord) -> Outcome {
        if claim.related_code.is_empty() {
            Outcome::new(
                VerificationStatus::Inconclusive,
                "Unable to automatically verify this claim",
                0.2,
            )
        } else {
            Outcome::new(
                VerificationStatus::Inconclusive,
                format!("Found related code in {} files", claim.related_code.len()),
                0.5,
            )
        }
    }

    fn benchmark_file(&self) -> Option<&str> {
        self.benchmark
            .get_or_init(|| find_benchmark(&self.root))
            .as_deref()
    }
}

/// First file whose lowercase name contains a benchmark pattern, trying
/// patterns in order.
fn find_benchmark(root: &Path) -> Option<String> {
    let files = match repo_files(root) {
        Ok(files) => files,
        Err(err) => {
            tracing::debug!(error = %err, "benchmark lookup failed");
            return None;
        }
    };

    let names: Vec<(String, &PathBuf)> = files
        .iter()
        .map(|p| {
            let name = p
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            (name, p)
        })
        .collect();

    BENCHMARK_PATTERNS.iter().find_map(|pattern| {
        names
            .iter()
            .find(|(name, _)| name.contains(pattern))
            .map(|(_, path)| path.display().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn record(method: Option<&str>, related: &[&str]) -> ClaimRecord {
        ClaimRecord {
            text: "claim".to_string(),
            claim_type: Some("api".to_string()),
            verification_method: method.map(str::to_string),
            related_code: related.iter().map(|s| s.to_string()).collect(),
            verifiable: None,
        }
    }

    #[test]
    fn test_api_verified_and_failed() {
        let temp = TempDir::new().unwrap();
        let verifier = ClaimVerifier::new(temp.path());

        let ok = verifier.verify_claim(&record(Some("unit_test"), &["a.py", "b.py"]));
        assert_eq!(ok.status, VerificationStatus::Verified);
        assert_eq!(ok.confidence, 0.8);
        assert_eq!(ok.evidence, vec!["Found implementation in 2 files"]);

        let missing = verifier.verify_claim(&record(Some("unit_test"), &[]));
        assert_eq!(missing.status, VerificationStatus::Failed);
        assert_eq!(missing.confidence, 0.9);
    }

    #[test]
    fn test_unverifiable_record_never_verified() {
        let temp = TempDir::new().unwrap();
        let verifier = ClaimVerifier::new(temp.path());

        let mut claim = record(Some("unit_test"), &["a.py"]);
        claim.verifiable = Some(false);
        let result = verifier.verify_claim(&claim);
        assert_eq!(result.status, VerificationStatus::Inconclusive);
        assert_eq!(result.evidence, vec!["Found related code in 1 files"]);
    }

    #[test]
    fn test_unverifiable_keeps_method_handler() {
        let temp = TempDir::new().unwrap();
        let verifier = ClaimVerifier::new(temp.path());

        let mut security = record(Some("security_test"), &[]);
        security.verifiable = Some(false);
        let result = verifier.verify_claim(&security);
        assert_eq!(result.status, VerificationStatus::Inconclusive);
        assert_eq!(result.confidence, 0.4);

        let mut bench = record(Some("benchmark"), &[]);
        bench.verifiable = Some(false);
        assert_eq!(verifier.verify_claim(&bench).confidence, 0.3);

        let mut typed = record(None, &["a.py"]);
        typed.verifiable = Some(false);
        let result = verifier.verify_claim(&typed);
        assert_eq!(result.status, VerificationStatus::Inconclusive);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_method_derived_from_type() {
        let temp = TempDir::new().unwrap();
        let verifier = ClaimVerifier::new(temp.path());

        let ok = verifier.verify_claim(&record(None, &["main.py"]));
        assert_eq!(ok.status, VerificationStatus::Verified);
        assert_eq!(ok.confidence, 0.8);

        let missing = verifier.verify_claim(&record(Some("manual"), &[]));
        assert_eq!(missing.status, VerificationStatus::Failed);
        assert_eq!(missing.confidence, 0.9);

        let mut security = record(None, &["main.py"]);
        security.claim_type = Some("security".to_string());
        assert_eq!(verifier.verify_claim(&security).confidence, 0.4);

        let mut feature = record(None, &["main.py"]);
        feature.claim_type = Some("feature".to_string());
        let result = verifier.verify_claim(&feature);
        assert_eq!(result.status, VerificationStatus::Inconclusive);
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn test_unknown_method_uses_general_handler() {
        let temp = TempDir::new().unwrap();
        let verifier = ClaimVerifier::new(temp.path());

        let mut untyped = record(Some("manual"), &[]);
        untyped.claim_type = Some("opinion".to_string());
        let result = verifier.verify_claim(&untyped);
        assert_eq!(result.claim_type, "opinion");
        assert_eq!(result.status, VerificationStatus::Inconclusive);
        assert_eq!(result.confidence, 0.2);
        assert_eq!(result.evidence, vec!["Unable to automatically verify this claim"]);
    }

    #[test]
    fn test_benchmark_lookup() {
        let temp = TempDir::new().unwrap();
        let verifier = ClaimVerifier::new(temp.path());
        let none = verifier.verify_claim(&record(Some("benchmark"), &[]));
        assert_eq!(none.confidence, 0.3);

        fs::create_dir_all(temp.path().join("tests")).unwrap();
        fs::write(temp.path().join("tests/Bench_Sort.py"), "").unwrap();
        fs::write(temp.path().join("tests/perf_io.py"), "").unwrap();

        let verifier = ClaimVerifier::new(temp.path());
        let found = verifier.verify_claim(&record(Some("benchmark"), &[]));
        assert_eq!(found.status, VerificationStatus::Inconclusive);
        assert_eq!(found.confidence, 0.5);
        // "perf" is tried before "bench"
        assert!(found.evidence[0].starts_with("Found potential benchmark: "));
        assert!(found.evidence[0].ends_with("perf_io.py"));
    }

    #[test]
    fn test_security_inconclusive() {
        let temp = TempDir::new().unwrap();
        let verifier = ClaimVerifier::new(temp.path());
        let result = verifier.verify_claim(&record(Some("security_test"), &["auth.py"]));
        assert_eq!(result.status, VerificationStatus::Inconclusive);
        assert_eq!(result.confidence, 0.4);
    }

    #[test]
    fn test_empty_input() {
        let temp = TempDir::new().unwrap();
        let mut verifier = ClaimVerifier::new(temp.path());
        let report = verifier.verify_claims(&[]);
        assert_eq!(report.summary, VerificationSummary::default());
        assert!(verifier.results().is_empty());
    }

    #[test]
    fn test_results_accumulate_across_calls() {
        let temp = TempDir::new().unwrap();
        let mut verifier = ClaimVerifier::new(temp.path());
        verifier.verify_claims(&[record(Some("unit_test"), &["a.py"])]);
        let mut untyped = record(None, &[]);
        untyped.claim_type = None;
        let report = verifier.verify_claims(&[untyped, record(Some("unit_test"), &[])]);

        assert_eq!(report.summary.total_claims, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.inconclusive, 1);
        assert_eq!(verifier.results().len(), 3);
    }

    #[test]
    fn test_record_from_json_defaults() {
        let record: ClaimRecord = serde_json::from_str(r#"{"text": "works"}"#).unwrap();
        assert_eq!(record.method(), None);
        assert!(record.related_code.is_empty());

        let temp = TempDir::new().unwrap();
        let result = ClaimVerifier::new(temp.path()).verify_claim(&record);
        assert_eq!(result.claim_type, "unknown");
    }
}
