//! Per-file errors collected during scanning.
//!
//! A single unreadable or malformed file never aborts an analysis. Callers
//! keep the successes and log the failures.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a file was skipped.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl ReadError {
    pub fn path(&self) -> &Path {
        match self {
            ReadError::Io { path, .. } | ReadError::Parse { path, .. } => path,
        }
    }
}

/// Read a file as UTF-8 text.
///
/// Invalid UTF-8 surfaces as an `Io` error with kind `InvalidData`.
pub fn read_text(path: &Path) -> Result<String, ReadError> {
    std::fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Log a skipped file and move on.
pub fn log_skipped(err: &ReadError) {
    tracing::debug!(path = %err.path().display(), error = %err, "skipping file");
}
