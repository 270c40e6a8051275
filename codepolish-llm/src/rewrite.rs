//! Code rewrite requests
//!
//! Sends the original code with a "focus" directive to the model and keeps the
//! first recognized fenced code block of the answer as the rewritten code.
//! Extraction is deliberately simple: the answer is split on ```` ``` ````
//! markers and the first segment starting with a known language tag wins, so
//! any later blocks are ignored.

use tracing::{debug, info, warn};

use crate::TextGenerator;

/// Summary returned whenever no rewrite could be obtained
pub const NO_CHANGES_MARKER: &str = "No changes made.";

/// Fence tags accepted as the start of the rewritten code block.
///
/// Matching is a prefix test on the trimmed segment, so `java` also accepts
/// `javascript` and `js` also accepts `json`. `java` extends the earlier
/// `python`/`cpp`/`js` set so Java rewrites are no longer dropped.
pub const RECOGNIZED_TAGS: &[&str] = &["python", "cpp", "java", "js"];

/// Outcome of one rewrite request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    /// Rewritten code, or the original code when nothing usable came back
    pub code: String,
    /// Full model answer, or [`NO_CHANGES_MARKER`]
    pub summary: String,
}

impl RewriteResult {
    /// Result that leaves the code untouched
    pub fn unchanged(original: &str) -> Self {
        Self {
            code: original.to_string(),
            summary: NO_CHANGES_MARKER.to_string(),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.summary == NO_CHANGES_MARKER
    }
}

/// Build the review prompt for `code` with the given focus
pub fn build_prompt(code: &str, focus: &str) -> String {
    format!(
        r#"You are an AI code reviewer. Your task is to improve the following code with a focus on **{focus}**, while preserving its functionality.

Make the code cleaner, more maintainable, and aligned with best practices for its language. If applicable, also:
- Fix potential performance issues
- Improve naming and documentation (e.g., comments, docstrings)
- Apply consistent formatting and style conventions
- Address any possible security concerns

After rewriting the code, provide only:

1. The final improved code inside a single properly formatted markdown code block with the appropriate language tag.
2. A clear and concise summary detailing the exact changes made, with specific references to line numbers or code snippets in proper markdown format.
3. Do not include the entire before/after code for the full file. Only show minimal relevant code snippets if needed to illustrate a change.

Code to review:
{code}
"#
    )
}

/// Pull the first recognized fenced code block out of a model answer.
///
/// The tag line is dropped and the remaining lines are joined and trimmed.
/// Returns `None` when no segment starts with a recognized tag.
pub fn extract_code_block(response: &str) -> Option<String> {
    response
        .split("```")
        .map(str::trim)
        .find(|segment| RECOGNIZED_TAGS.iter().any(|tag| segment.starts_with(tag)))
        .map(|segment| {
            segment
                .lines()
                .skip(1)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
}

/// Rewrites code through a [`TextGenerator`]
#[derive(Debug, Clone)]
pub struct RewriteClient<G> {
    generator: G,
}

impl<G: TextGenerator> RewriteClient<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask the model to improve `code` with the given focus.
    ///
    /// Never fails: a model error, an empty answer or an answer without a
    /// recognized code block all yield [`RewriteResult::unchanged`].
    pub async fn improve(&self, code: &str, focus: &str) -> RewriteResult {
        let prompt = build_prompt(code, focus);

        let response = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Rewrite request failed: {}", e);
                return RewriteResult::unchanged(code);
            }
        };

        let full_response = response.trim();
        if full_response.is_empty() {
            warn!("Model returned an empty answer");
            return RewriteResult::unchanged(code);
        }

        info!("AI response received ({} characters)", full_response.len());
        debug!("AI response:\n{}", full_response);

        match extract_code_block(full_response) {
            Some(improved) => RewriteResult {
                code: improved,
                summary: full_response.to_string(),
            },
            None => {
                warn!("No recognized code block in model answer, keeping original code");
                RewriteResult::unchanged(code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LlmError, LlmResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Generator returning a canned answer and recording prompts
    struct CannedGenerator {
        answer: LlmResult<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        fn answering(text: &str) -> Self {
            Self {
                answer: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: Err(LlmError::Inference("quota exceeded".to_string())),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str) -> LlmResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(LlmError::Inference(e.to_string())),
            }
        }
    }

    #[test]
    fn test_prompt_mentions_focus_and_code() {
        let prompt = build_prompt("x = 1", "security");
        assert!(prompt.contains("**security**"));
        assert!(prompt.ends_with("Code to review:\nx = 1\n"));
    }

    #[test]
    fn test_extracts_first_tagged_block() {
        let answer = "Here you go:\n```python\ndef f():\n    return 2\n```\nAnd a test:\n```python\nassert f() == 2\n```";
        assert_eq!(extract_code_block(answer).as_deref(), Some("def f():\n    return 2"));
    }

    #[test]
    fn test_untagged_block_is_ignored() {
        let answer = "```\nplain\n```\n```cpp\nint main() {}\n```";
        assert_eq!(extract_code_block(answer).as_deref(), Some("int main() {}"));
    }

    #[test]
    fn test_prefix_matching_tags() {
        assert_eq!(extract_code_block("```java\nclass A {}\n```").as_deref(), Some("class A {}"));
        assert_eq!(extract_code_block("```javascript\nlet a = 1;\n```").as_deref(), Some("let a = 1;"));
        assert_eq!(extract_code_block("```json\n{}\n```").as_deref(), Some("{}"));
        assert_eq!(extract_code_block("```rust\nfn main() {}\n```"), None);
    }

    #[test]
    fn test_tag_only_block_is_empty() {
        assert_eq!(extract_code_block("```python```").as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_improve_returns_block_and_full_answer() {
        let answer = "  ```python\nprint('fast')\n```\n**Summary**: sped it up\n";
        let client = RewriteClient::new(CannedGenerator::answering(answer));

        let result = client.improve("print('slow')", "performance").await;

        assert_eq!(result.code, "print('fast')");
        assert_eq!(result.summary, answer.trim());
        assert!(!result.is_unchanged());

        let prompts = client.generator().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("**performance**"));
        assert!(prompts[0].contains("print('slow')"));
    }

    #[tokio::test]
    async fn test_no_block_keeps_original_bytes() {
        let original = "print('x')  \n\n";
        let client = RewriteClient::new(CannedGenerator::answering("Looks fine to me."));

        let result = client.improve(original, "readability").await;

        assert_eq!(result.code, original);
        assert_eq!(result.summary, NO_CHANGES_MARKER);
    }

    #[tokio::test]
    async fn test_model_error_falls_back() {
        let client = RewriteClient::new(CannedGenerator::failing());
        let result = client.improve("int x;", "readability").await;
        assert_eq!(result, RewriteResult::unchanged("int x;"));
    }

    #[tokio::test]
    async fn test_empty_answer_falls_back() {
        let client = RewriteClient::new(CannedGenerator::answering("   \n"));
        let result = client.improve("a", "readability").await;
        assert!(result.is_unchanged());
        assert_eq!(result.code, "a");
    }
}
