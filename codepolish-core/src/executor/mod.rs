//! Remote code execution
//!
//! Runs a snippet in a remote sandbox and reports whether it exited cleanly.
//! Every failure mode (unknown language, transport error, non-zero exit) is
//! folded into an [`ExecutionOutcome`]; callers never see an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod piston;

pub use piston::PistonClient;

/// Result of one execution attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub diagnostic: String,
}

impl ExecutionOutcome {
    pub fn passed(diagnostic: impl Into<String>) -> Self {
        Self {
            success: true,
            diagnostic: diagnostic.into(),
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            success: false,
            diagnostic: diagnostic.into(),
        }
    }
}

/// Something that can run code and report pass/fail
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    /// Execute `code` declared as `language` (`None` when the language could
    /// not be detected).
    async fn execute(&self, language: Option<&str>, code: &str) -> ExecutionOutcome;
}
