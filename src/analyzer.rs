//! Documentation analysis pipeline.
//!
//! ```text
//! walk ─▶ scan ─▶ ExtractedClaim ─▶ correlate ─▶ CorrelatedClaim ─▶ assign_strategy ─▶ Claim ─▶ report
//! ```

use std::path::{Path, PathBuf};

use crate::claims::Claim;
use crate::config::{self, Config};
use crate::correlate::{correlate, SourceIndex};
use crate::report::AnalysisReport;
use crate::scan::DocumentScanner;
use crate::strategy::recommendations;
use crate::walk::repo_files;

/// Analyzes the documentation of one repository.
pub struct DocumentationAnalyzer {
    root: PathBuf,
    config: Config,
}

impl DocumentationAnalyzer {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config: Config::default(),
        }
    }

    /// Use the given configuration instead of the defaults.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the full pipeline and return processed claims with the report.
    pub fn analyze_claims(&self) -> anyhow::Result<(Vec<Claim>, AnalysisReport)> {
        config::validate(&self.config)?;

        let files = repo_files(&self.root)?;
        let scanner = DocumentScanner::new(&self.root, &self.config)?;
        let scan = scanner.scan(&files);

        let sources: Vec<PathBuf> = files
            .into_iter()
            .filter(|p| {
                !self
                    .config
                    .is_path_excluded(p.strip_prefix(&self.root).unwrap_or(p))
            })
            .collect();
        let index = SourceIndex::build(&sources);

        let claims: Vec<Claim> = scan
            .claims
            .into_iter()
            .map(|claim| correlate(claim, &index).assign_strategy())
            .collect();

        let documentation_files = scan
            .documentation_files
            .iter()
            .map(|p| p.strip_prefix(&self.root).unwrap_or(p).display().to_string())
            .collect();

        let report = AnalysisReport::build(
            &claims,
            documentation_files,
            scan.code_references,
            recommendations(&claims),
            self.config.high_confidence(),
        );

        tracing::info!(
            root = %self.root.display(),
            claims = report.summary.total_claims,
            verifiable = report.summary.verifiable_claims,
            documentation_files = report.summary.documentation_files,
            "analysis complete"
        );

        Ok((claims, report))
    }

    /// Analyze the repository.
    pub fn analyze(&self) -> anyhow::Result<AnalysisReport> {
        self.analyze_claims().map(|(_, report)| report)
    }
}
