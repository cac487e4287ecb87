//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and resolved into application types by
//! the binary.

mod agent;
mod logging;
mod repl;
mod services;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use repl::FileReplConfig;
pub use services::{FileServiceConfig, ServiceEndpoint};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("{0}.model cannot be empty")]
    EmptyModelName(&'static str),

    #[error("{0}.base_url cannot be empty")]
    EmptyBaseUrl(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Relevance classifier service
    pub classifier: FileServiceConfig,
    /// Answer (analysis plan) service
    pub answer: FileServiceConfig,
    /// Analysis agent settings
    pub agent: FileAgentConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Endpoint of the relevance classifier, defaults filled in.
    pub fn classifier_endpoint(&self) -> ServiceEndpoint {
        self.classifier.resolve(&ServiceEndpoint::together())
    }

    /// Endpoint of the answer service, defaults filled in.
    pub fn answer_endpoint(&self) -> ServiceEndpoint {
        self.answer.resolve(&ServiceEndpoint::groq())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.classifier.validate("classifier")?;
        self.answer.validate("answer")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[classifier]
model = "mistralai/Mixtral-8x22B-Instruct-v0.1"
timeout_seconds = 20

[answer]
base_url = "http://localhost:8080/v1"
model = "llama3-8b-8192"
api_key = "secret"

[agent]
save_charts = false
enable_cache = true
charts_dir = "out/charts"
sample_rows = 5

[repl]
show_progress = false
preview_rows = 2
full_transcript = false
history_file = "~/.local/share/datawizard/history.txt"

[logging]
conversation_log = "logs/session.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let classifier = config.classifier_endpoint();
        assert_eq!(classifier.model, "mistralai/Mixtral-8x22B-Instruct-v0.1");
        assert_eq!(classifier.base_url, "https://api.together.xyz/v1");
        assert_eq!(classifier.timeout_seconds, 20);

        let answer = config.answer_endpoint();
        assert_eq!(answer.base_url, "http://localhost:8080/v1");
        assert_eq!(answer.api_key, "secret");

        assert!(!config.agent.save_charts);
        assert!(config.agent.enable_cache);
        assert_eq!(config.agent.sample_rows, 5);
        assert!(!config.repl.show_progress);
        assert_eq!(config.repl.preview_rows, 2);
        assert!(!config.repl.full_transcript);
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("logs/session.jsonl")
        );
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        let classifier = config.classifier_endpoint();
        assert_eq!(classifier.model, "mistralai/Mixtral-8x7B-Instruct-v0.1");
        assert_eq!(classifier.api_key, "");
        assert_eq!(config.answer_endpoint().model, "llama3-70b-8192");
        assert!(config.agent.save_charts);
        assert!(!config.agent.enable_cache);
        assert!(config.repl.show_progress);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[answer]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout("answer"))
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[classifier]
model = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName("classifier"))
        );
    }
}
