//! Command-line interface for claimcheck.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::analyzer::DocumentationAnalyzer;
use crate::config::{self, Config};
use crate::report;
use crate::verify::{ClaimRecord, ClaimVerifier};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Extract and verify claims made by a repository's documentation.
///
/// Claimcheck reads READMEs, guides and doc comments, pulls out statements
/// about features, performance, security, API and behavior, and checks
/// which of them the code actually backs up.
#[derive(Parser)]
#[command(name = "claimcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract claims from a repository's documentation
    Analyze(AnalyzeArgs),
    /// Verify a list of claim records against a repository
    Verify(VerifyArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Repository to analyze
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover in the repository)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Also verify the extracted claims
    #[arg(long)]
    pub verify: bool,
}

/// Arguments for the verify command.
#[derive(Parser)]
pub struct VerifyArgs {
    /// Repository to verify against
    pub path: PathBuf,

    /// JSON file holding an array of claim records
    #[arg(long)]
    pub claims: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

fn check_format(format: &str) -> bool {
    if format != "pretty" && format != "json" {
        eprintln!("Error: invalid format {:?}, must be 'pretty' or 'json'", format);
        return false;
    }
    true
}

fn check_repository(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(m) if m.is_dir() => true,
        Ok(_) => {
            eprintln!("Error: {:?} is not a directory", path);
            false
        }
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", path, e);
            false
        }
    }
}

/// Load the configuration from `--config` or the repository.
fn load_config(args: &AnalyzeArgs) -> anyhow::Result<Config> {
    let config = match &args.config {
        Some(path) => Config::parse_file(path)?,
        None => Config::discover(&args.path)?.unwrap_or_default(),
    };
    config::validate(&config)?;
    Ok(config)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if !check_format(&args.format) || !check_repository(&args.path) {
        return Ok(EXIT_ERROR);
    }

    let config = match load_config(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let analysis = DocumentationAnalyzer::new(&args.path)
        .with_config(config)
        .analyze()?;

    let verification = if args.verify {
        let mut verifier = ClaimVerifier::new(&args.path);
        Some(verifier.verify_claims(&analysis.claim_records()))
    } else {
        None
    };

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_json(&analysis, verification.as_ref())?,
        _ => report::write_pretty(&path_str, &analysis, verification.as_ref()),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the verify command.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<i32> {
    if !check_format(&args.format) || !check_repository(&args.path) {
        return Ok(EXIT_ERROR);
    }

    let content = match std::fs::read_to_string(&args.claims) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: cannot read claims {:?}: {}", args.claims, e);
            return Ok(EXIT_ERROR);
        }
    };
    let records: Vec<ClaimRecord> = match serde_json::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error parsing claims: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let mut verifier = ClaimVerifier::new(&args.path);
    let result = verifier.verify_claims(&records);

    let path_str = args.path.to_string_lossy().to_string();
    match args.format.as_str() {
        "json" => report::write_verification_json(&result)?,
        _ => report::write_verification_pretty(&path_str, &result),
    }

    Ok(EXIT_SUCCESS)
}
