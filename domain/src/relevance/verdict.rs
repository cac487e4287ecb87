//! Relevance verdict value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Structured judgment of whether a query is about the loaded data.
///
/// When `status` is false the `message` is the reply shown to the user
/// instead of running an analysis. When `status` is true the message is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceVerdict {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RelevanceVerdict {
    pub fn relevant() -> Self {
        Self {
            status: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: Some(message.into()),
        }
    }

    pub fn is_relevant(&self) -> bool {
        self.status
    }

    /// The canned reply for an out-of-scope query.
    ///
    /// Returns `None` for relevant verdicts, whatever the model put in `message`.
    pub fn reply(&self) -> Option<&str> {
        if self.status {
            None
        } else {
            self.message.as_deref()
        }
    }

    /// Parse the classifier's completion text.
    ///
    /// The text must be a single JSON object of the verdict shape. A
    /// rejection without a non-blank message is refused as well, since
    /// there would be nothing to show the user.
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let verdict: RelevanceVerdict = serde_json::from_str(text.trim())
            .map_err(|e| DomainError::InvalidVerdict(format!("{}: {}", e, text.trim())))?;

        if !verdict.status
            && verdict
                .message
                .as_deref()
                .is_none_or(|m| m.trim().is_empty())
        {
            return Err(DomainError::InvalidVerdict(
                "status is false but no message was given".to_string(),
            ));
        }

        Ok(verdict)
    }
}
