//! Analysis results and their output formats.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::claims::{method_or_empty, Claim, ClaimType, VerificationMethod};
use crate::strategy::{Priority, Recommendation};
use crate::verify::{ClaimRecord, VerificationReport, VerificationResult, VerificationStatus};

// =============================================================================
// Analysis result
// =============================================================================

/// Headline numbers of an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_claims: usize,
    pub verifiable_claims: usize,
    /// Percentage of verifiable claims, 0 when there are none.
    pub verification_rate: f64,
    pub high_confidence_claims: usize,
    pub documentation_files: usize,
    pub code_references_found: usize,
}

/// A claim listed under its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedClaimEntry {
    pub text: String,
    pub source: String,
    pub confidence: f64,
    pub verifiable: bool,
    #[serde(with = "method_or_empty")]
    pub verification_method: Option<VerificationMethod>,
    pub related_code: Vec<String>,
}

/// A claim listed under its source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceClaimEntry {
    pub text: String,
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    pub confidence: f64,
}

/// Result of analyzing a repository's documentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub claims_by_type: BTreeMap<ClaimType, Vec<TypedClaimEntry>>,
    pub claims_by_source: BTreeMap<String, Vec<SourceClaimEntry>>,
    /// Paths relative to the repository root
    pub documentation_files: Vec<String>,
    pub code_references: BTreeMap<String, Vec<String>>,
    pub verification_recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    /// Compile a report from processed claims.
    pub fn build(
        claims: &[Claim],
        documentation_files: Vec<String>,
        code_references: BTreeMap<String, Vec<String>>,
        recommendations: Vec<Recommendation>,
        high_confidence: f64,
    ) -> Self {
        let mut claims_by_type: BTreeMap<ClaimType, Vec<TypedClaimEntry>> = BTreeMap::new();
        let mut claims_by_source: BTreeMap<String, Vec<SourceClaimEntry>> = BTreeMap::new();

        for claim in claims {
            claims_by_type
                .entry(claim.claim_type)
                .or_default()
                .push(TypedClaimEntry {
                    text: claim.text.clone(),
                    source: claim.source_file.clone(),
                    confidence: claim.confidence,
                    verifiable: claim.verifiable,
                    verification_method: claim.verification_method,
                    related_code: claim.related_code.clone(),
                });
            claims_by_source
                .entry(claim.source_file.clone())
                .or_default()
                .push(SourceClaimEntry {
                    text: claim.text.clone(),
                    claim_type: claim.claim_type,
                    confidence: claim.confidence,
                });
        }

        let total = claims.len();
        let verifiable = claims.iter().filter(|c| c.verifiable).count();

        let summary = AnalysisSummary {
            total_claims: total,
            verifiable_claims: verifiable,
            verification_rate: if total > 0 {
                verifiable as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            high_confidence_claims: claims
                .iter()
                .filter(|c| c.is_high_confidence(high_confidence))
                .count(),
            documentation_files: documentation_files.len(),
            code_references_found: code_references.values().map(Vec::len).sum(),
        };

        Self {
            summary,
            claims_by_type,
            claims_by_source,
            documentation_files,
            code_references,
            verification_recommendations: recommendations,
        }
    }

    /// Flatten claims into verifier input, grouped by type.
    pub fn claim_records(&self) -> Vec<ClaimRecord> {
        self.claims_by_type
            .iter()
            .flat_map(|(claim_type, entries)| {
                entries.iter().map(move |e| ClaimRecord {
                    text: e.text.clone(),
                    claim_type: Some(claim_type.as_str().to_string()),
                    verification_method: e.verification_method.map(|m| m.as_str().to_string()),
                    related_code: e.related_code.clone(),
                    verifiable: Some(e.verifiable),
                })
            })
            .collect()
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Analysis output, with verification results when requested.
#[derive(Serialize)]
struct JsonAnalysis<'a> {
    #[serde(flatten)]
    analysis: &'a AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    verification: Option<&'a VerificationReport>,
}

/// Write an analysis in JSON format.
pub fn write_json(
    report: &AnalysisReport,
    verification: Option<&VerificationReport>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&JsonAnalysis {
        analysis: report,
        verification,
    })?;
    println!("{}", json);
    Ok(())
}

/// Write a verification report in JSON format.
pub fn write_verification_json(report: &VerificationReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write an analysis in pretty (colored terminal) format.
pub fn write_pretty(path: &str, report: &AnalysisReport, verification: Option<&VerificationReport>) {
    write_header(path);

    let s = &report.summary;
    println!(
        "  {} {}  {} {}  {} {}",
        "Claims:".dimmed(),
        s.total_claims.to_string().bold(),
        "Verifiable:".dimmed(),
        s.verifiable_claims,
        "High confidence:".dimmed(),
        s.high_confidence_claims
    );
    println!(
        "  {} {}  {} {}  {} {:.1}%",
        "Docs:".dimmed(),
        s.documentation_files,
        "Code references:".dimmed(),
        s.code_references_found,
        "Verifiable rate:".dimmed(),
        s.verification_rate
    );
    println!();

    if !report.claims_by_type.is_empty() {
        println!("  {}", "Claims by type".bold());
        for (claim_type, entries) in &report.claims_by_type {
            println!("    {:<12} {}", claim_type.as_str(), entries.len());
        }
        println!();
    }

    if !report.verification_recommendations.is_empty() {
        println!("  {}", "Recommendations".bold());
        for rec in &report.verification_recommendations {
            print!("    ");
            write_colored_priority(rec.priority);
            println!("  {}", rec.description);
            for example in &rec.examples {
                println!("      {} {}", "·".dimmed(), example.dimmed());
            }
        }
        println!();
    }

    if let Some(verification) = verification {
        write_verification_body(verification);
    }
}

/// Write a verification report in pretty format.
pub fn write_verification_pretty(path: &str, report: &VerificationReport) {
    write_header(path);
    write_verification_body(report);
}

fn write_header(path: &str) {
    println!();
    print!("  ");
    print!("{}", "claimcheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", "Repository: ".dimmed());
    println!("{}", path);
    println!();
}

fn write_verification_body(report: &VerificationReport) {
    let s = &report.summary;
    println!(
        "  {} {}  {} {}  {} {}  {} {:.1}%",
        "Verified:".dimmed(),
        s.verified.to_string().green(),
        "Failed:".dimmed(),
        s.failed.to_string().red(),
        "Inconclusive:".dimmed(),
        s.inconclusive.to_string().yellow(),
        "Rate:".dimmed(),
        s.verification_rate
    );
    println!();

    if !report.failed.is_empty() {
        println!("  {}", "Failed claims".bold());
        for result in &report.failed {
            write_result(result);
        }
        println!();
    }
}

fn write_result(result: &VerificationResult) {
    let status = match result.status {
        VerificationStatus::Verified => "✓".green(),
        VerificationStatus::Failed => "✗".red(),
        VerificationStatus::Inconclusive => "?".yellow(),
    };
    println!("    {} [{}] {}", status, result.claim_type, result.claim);
    for evidence in &result.evidence {
        println!("        {}", evidence.dimmed());
    }
}

fn write_colored_priority(priority: Priority) {
    let label = format!("{:<6}", priority.as_str());
    match priority {
        Priority::High => print!("{}", label.red().bold()),
        Priority::Medium => print!("{}", label.yellow()),
        Priority::Low => print!("{}", label.dimmed()),
    }
}
