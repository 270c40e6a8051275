//! codepolish utilities
//!
//! Shared plumbing for the other workspace crates: logging initialization,
//! environment-driven configuration, file writes into the mirrored output
//! tree and character-safe string truncation.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod config;
pub mod file;
pub mod logging;
pub mod string;

pub use config::AppConfig;
pub use file::{mirror_path, normalize_path, save_file};
pub use string::truncate_chars;

/// Result type used throughout codepolish utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Path operation error
    #[error("Path operation error: {0}")]
    PathOperation(String),
}
