//! Claimcheck - documentation claim extraction and verification.
//!
//! Claimcheck reads a repository's documentation, extracts typed claims
//! about the software, links them to source code and decides how each claim
//! could be verified.
//!
//! # Architecture
//!
//! - `claims`: Claim types, pattern classifier and confidence scorer
//! - `scan`: Documentation discovery and per-format text extraction
//! - `parser`: Tree-sitter doc comment extractors, keyed by file extension
//! - `correlate`: Source index and claim-to-code correlation
//! - `strategy`: Verification methods and recommendations
//! - `verify`: Claim verification against a repository
//! - `analyzer`: The end-to-end pipeline
//! - `report`: Output formatting (pretty, JSON)
//!
//! # Adding a New Language
//!
//! See `src/parser/languages/` for examples. Implement `DocExtractor` (or
//! configure a `CommentDocExtractor`) and register it in `languages/mod.rs`.

pub mod analyzer;
pub mod claims;
pub mod cli;
pub mod config;
pub mod correlate;
pub mod error;
pub mod parser;
pub mod report;
pub mod scan;
pub mod strategy;
pub mod verify;
pub mod walk;

pub use analyzer::DocumentationAnalyzer;
pub use claims::{Claim, ClaimType, CorrelatedClaim, ExtractedClaim, VerificationMethod};
pub use config::Config;
pub use parser::{for_extension, init as init_parsers, DocExtractor};
pub use report::AnalysisReport;
pub use verify::{ClaimRecord, ClaimVerifier, VerificationReport, VerificationStatus};

/// Initialize all subsystems.
///
/// The analyzer initializes on demand, so calling this is optional and
/// repeated calls are cheap.
pub fn init() {
    init_parsers();
}
