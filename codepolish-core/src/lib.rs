//! codepolish core - language tables, metrics and remote execution
//!
//! This crate provides the leaf components of the review pipeline:
//! - static lookup tables mapping extensions to languages and languages to
//!   pinned runtime versions
//! - the metrics analyzer (tree-sitter based structured analysis plus a
//!   keyword heuristic)
//! - the client for the remote sandboxed code-execution service

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_precision_loss,
)]

pub mod constants;
pub mod executor;
pub mod metrics;

pub use constants::{is_supported_extension, language_for_path, piston_version};
pub use executor::{CodeExecutor, ExecutionOutcome, PistonClient};
pub use metrics::{analyze, format_metric, MetricsResult};

/// Result type used throughout codepolish core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for codepolish core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Analysis error
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// No analyzer or runtime for the language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}
