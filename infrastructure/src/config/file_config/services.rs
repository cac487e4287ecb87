//! Chat completion service configuration (`[classifier]` and `[answer]` sections)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Raw service configuration from TOML
///
/// # Example
///
/// ```toml
/// [classifier]
/// base_url = "https://api.together.xyz/v1"
/// model = "mistralai/Mixtral-8x7B-Instruct-v0.1"
/// timeout_seconds = 30
///
/// [answer]
/// model = "llama3-70b-8192"
/// ```
///
/// Unset fields fall back to the service's defaults. API keys normally come
/// from `TOGETHER_API_KEY` / `GROQ_API_KEY`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServiceConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// A fully resolved service endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub base_url: String,
    pub model: String,
    /// Empty when no key was configured
    pub api_key: String,
    pub timeout_seconds: u64,
}

impl ServiceEndpoint {
    /// Together AI, hosting the relevance classifier
    pub fn together() -> Self {
        Self {
            base_url: "https://api.together.xyz/v1".to_string(),
            model: "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string(),
            api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Groq, hosting the answer model
    pub fn groq() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama3-70b-8192".to_string(),
            api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl FileServiceConfig {
    pub fn resolve(&self, defaults: &ServiceEndpoint) -> ServiceEndpoint {
        ServiceEndpoint {
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| defaults.base_url.clone()),
            model: self.model.clone().unwrap_or_else(|| defaults.model.clone()),
            api_key: self
                .api_key
                .clone()
                .unwrap_or_else(|| defaults.api_key.clone()),
            timeout_seconds: self.timeout_seconds.unwrap_or(defaults.timeout_seconds),
        }
    }

    pub(super) fn validate(&self, section: &'static str) -> Result<(), ConfigValidationError> {
        if let Some(0) = self.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout(section));
        }
        if self.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName(section));
        }
        if self.base_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyBaseUrl(section));
        }
        Ok(())
    }
}
