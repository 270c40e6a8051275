//! codepolish analysis - per-file review pipeline and report
//!
//! This crate ties the leaf components together:
//! - `pipeline`: validate → analyze → rewrite → re-analyze → save →
//!   re-validate → report, for one file
//! - `report`: the append-only Markdown report
//! - `walker`: enumerates the input tree and drives the pipeline per file

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod pipeline;
pub mod report;
pub mod source;
pub mod walker;

// Re-export main types for convenience
pub use pipeline::{FileOutcome, FilePipeline};
pub use report::{ReportEntry, ReportWriter, REPORT_FILE_NAME};
pub use source::SourceFile;
pub use walker::{process_codebase, RunSummary};

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pipeline and report operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Utility error
    #[error("Utility error: {0}")]
    Util(#[from] codepolish_utils::UtilError),

    /// Input directory missing or not a directory
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Path outside the tree it was expected in
    #[error("Path operation error: {0}")]
    PathOperation(String),
}
