//! codepolish LLM - code rewriting through a hosted language model
//!
//! Key components:
//! - `GeminiClient`: thin HTTP client for the Gemini `generateContent` API
//! - `RewriteClient`: builds the review prompt and pulls the rewritten code
//!   block out of the model's answer

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use async_trait::async_trait;

pub mod gemini;
pub mod rewrite;

pub use gemini::GeminiClient;
pub use rewrite::{build_prompt, extract_code_block, RewriteClient, RewriteResult, NO_CHANGES_MARKER};

/// Result type for LLM operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Error types for LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Transport failure or undecodable response body; built without the
    /// request URL
    #[error("Gemini API request failed: {0}")]
    Http(reqwest::Error),

    /// Model inference error
    #[error("Model inference error: {0}")]
    Inference(String),
}

/// A model that turns a prompt into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> LlmResult<String>;
}
