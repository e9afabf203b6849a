//! Core data model
//!
//! Every stage of the pipeline hands one of these types to the next; nothing is
//! mutated once it has been produced.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing code material
#[derive(Error, Debug)]
pub enum CodematError {
    /// The source directory does not exist or is not a directory
    #[error("source directory not found: {}", path.display())]
    MissingRootDirectory { path: PathBuf },

    /// A discovered file could not be read or is not valid UTF-8
    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory entry could not be visited during traversal
    #[error("failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    /// The report could not be created or written
    #[error("failed to write output file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured suffix is empty
    #[error("invalid suffix {0:?}: suffixes must not be empty")]
    InvalidSuffix(String),
}

/// A file found under the source directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute (or root-joined) path used for reading
    pub path: PathBuf,
    /// Path shown in the banner: relative to root with '/' separators when
    /// the file lies under root, the raw path otherwise
    pub display: String,
}

impl DiscoveredFile {
    pub fn new(path: impl Into<PathBuf>, display: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display: display.into(),
        }
    }
}

/// A file that was discovered but dropped from the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// The four figures printed in the report's statistics block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Length of the full line sequence
    pub total_lines: usize,
    /// Lines in the head excerpt
    pub head_lines: usize,
    /// Lines in the tail excerpt
    pub tail_lines: usize,
    /// Number of discovered files, including skipped ones
    pub file_count: usize,
}

/// Everything reported back to the user after a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSummary {
    /// Where the report went (`None` when written to stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Excerpt window size
    pub window: usize,
    #[serde(flatten)]
    pub stats: ReportStats,
    /// Files whose content made it into the corpus
    pub read_files: usize,
    pub skipped_files: Vec<SkippedFile>,
    /// xxh3 digest of the report bytes
    pub digest: String,
}
