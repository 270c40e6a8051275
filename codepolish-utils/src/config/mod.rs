//! Runtime configuration
//!
//! The only user-supplied setting is the Gemini API key. It comes from the
//! process environment, optionally seeded from a `.env` file in the working
//! directory. Service endpoints are fixed; the setters exist so tests can point
//! the clients at a local mock server.

use std::path::Path;

/// Environment variable holding the Gemini API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default Piston execution API base
pub const DEFAULT_PISTON_BASE_URL: &str = "https://emkc.org/api/v2/piston";

/// Default Gemini models API base
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Settings shared by the remote clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub gemini_base_url: String,
    pub piston_base_url: String,
}

impl AppConfig {
    /// Build a configuration with the default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            piston_base_url: DEFAULT_PISTON_BASE_URL.to_string(),
        }
    }

    /// Load `.env` (if present) and read the API key from the environment
    pub fn from_env() -> crate::Result<Self> {
        load_dotenv(None)?;
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the API key through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                crate::UtilError::Config(format!("{} is not set", API_KEY_VAR))
            })?;

        Ok(Self::new(api_key))
    }

    pub fn with_gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = url.into();
        self
    }

    pub fn with_piston_base_url(mut self, url: impl Into<String>) -> Self {
        self.piston_base_url = url.into();
        self
    }
}

/// Load environment variables from a `.env` file.
///
/// With `None` the file is searched from the working directory upwards. A
/// missing file is not an error; a malformed one is.
pub fn load_dotenv(path: Option<&Path>) -> crate::Result<()> {
    let result = match path {
        Some(path) => dotenvy::from_path(path).map(|_| ()),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => {
            tracing::debug!("No .env file found, using process environment only");
            Ok(())
        }
        Err(e) => Err(crate::UtilError::Config(format!("Failed to load .env file: {}", e))),
    }
}
