//! Piston execution API client
//!
//! Submits a single-file program to `POST {base}/execute` with the runtime
//! version pinned by [`crate::constants::PISTON_VERSIONS`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CodeExecutor, ExecutionOutcome};
use crate::constants::piston_version;
use codepolish_utils::AppConfig;

/// Name of the single file submitted with each request
const SCRIPT_FILE_NAME: &str = "script";

/// Diagnostic used when the service reports neither stderr nor output
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<SourceFilePayload<'a>>,
}

#[derive(Debug, Serialize)]
struct SourceFilePayload<'a> {
    name: &'a str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    run: Option<RunResult>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RunResult {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    stderr: Option<String>,
    #[serde(default)]
    output: Option<String>,
}

impl RunResult {
    fn diagnostic(&self) -> String {
        [&self.stderr, &self.output]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .map_or(UNKNOWN_ERROR, String::as_str)
            .trim()
            .to_string()
    }
}

/// Client for the public Piston instance (or any compatible server)
#[derive(Debug, Clone)]
pub struct PistonClient {
    base_url: String,
    client: Client,
}

impl PistonClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.piston_base_url.clone())
    }

    async fn submit(&self, language: &str, version: &str, code: &str) -> Result<ExecuteResponse, reqwest::Error> {
        let url = format!("{}/execute", self.base_url);
        let request = ExecuteRequest {
            language,
            version,
            files: vec![SourceFilePayload {
                name: SCRIPT_FILE_NAME,
                content: code,
            }],
        };

        self.client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .json::<ExecuteResponse>()
            .await
    }
}

#[async_trait]
impl CodeExecutor for PistonClient {
    async fn execute(&self, language: Option<&str>, code: &str) -> ExecutionOutcome {
        let language_name = language.unwrap_or("unknown");
        let Some(version) = language.and_then(piston_version) else {
            warn!("Unsupported language for Piston: {}", language_name);
            return ExecutionOutcome::failed(format!("Unsupported language for Piston: {}", language_name));
        };

        debug!("Executing {} {} snippet ({} bytes)", language_name, version, code.len());

        let response = match self.submit(language_name, version, code).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Piston error for {}: {}", language_name, e);
                return ExecutionOutcome::failed(e.to_string());
            }
        };

        let Some(run) = response.run else {
            if let Some(message) = &response.message {
                warn!("Piston rejected {} request: {}", language_name, message);
            }
            return ExecutionOutcome::failed(UNKNOWN_ERROR);
        };

        let diagnostic = run.diagnostic();
        if run.code == Some(0) {
            ExecutionOutcome::passed(diagnostic)
        } else {
            debug!("{} snippet exited with {:?}", language_name, run.code);
            ExecutionOutcome::failed(diagnostic)
        }
    }
}
