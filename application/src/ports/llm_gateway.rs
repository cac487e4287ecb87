//! LLM Gateway port
//!
//! Defines the interface for calling hosted chat-completion services.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Missing API key for {0}")]
    MissingCredential(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One single-turn completion request: a system prompt plus the user's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_message: String,
    /// Ask the service to constrain its output to a single JSON object.
    pub json_mode: bool,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, user_message: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            json_mode: false,
        }
    }

    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to chat-completion
/// services. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Model identifier used by this gateway (for logs)
    fn model(&self) -> &str;

    /// Send one request and return the text of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = CompletionRequest::new("system", "hi").with_json_mode();
        assert_eq!(request.system_prompt, "system");
        assert_eq!(request.user_message, "hi");
        assert!(request.json_mode);
    }

    #[test]
    fn test_missing_credential_display() {
        let err = GatewayError::MissingCredential("classifier (TOGETHER_API_KEY)".to_string());
        assert_eq!(
            err.to_string(),
            "Missing API key for classifier (TOGETHER_API_KEY)"
        );
    }
}
