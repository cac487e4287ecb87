//! Classify Relevance use case.
//!
//! Asks the classifier model whether a query is about the loaded table.
//! The request is sent in JSON mode and the reply must parse as a
//! [`RelevanceVerdict`]; anything else is refused rather than guessed at.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use wizard_domain::{DatasetHandle, DomainError, RelevanceVerdict, relevance_system_prompt, truncate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("{0}")]
    Malformed(DomainError),
}

/// Use case wrapping one classifier call per query. No caching.
#[derive(Clone)]
pub struct ClassifyRelevanceUseCase {
    gateway: Arc<dyn LlmGateway>,
}

impl ClassifyRelevanceUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    pub async fn execute(
        &self,
        dataset: &DatasetHandle,
        query: &str,
    ) -> Result<RelevanceVerdict, ClassifyError> {
        let request = CompletionRequest::new(relevance_system_prompt(dataset), query).with_json_mode();

        debug!(
            "Classifying query with {}: {}",
            self.gateway.model(),
            truncate(query, 100)
        );
        let text = self.gateway.complete(&request).await?;

        let verdict = RelevanceVerdict::parse(&text).map_err(ClassifyError::Malformed)?;
        info!("Relevance verdict: status={}", verdict.status);
        Ok(verdict)
    }
}
