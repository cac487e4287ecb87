//! Analysis agent port
//!
//! An analysis agent is bound to one dataset when it is built and answers
//! in-scope questions about it. How it plans and computes is its own
//! business; callers only see the tagged [`AnalysisOutcome`].

use super::llm_gateway::GatewayError;
use crate::config::AgentSettings;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use wizard_domain::{AnalysisOutcome, DatasetHandle, DomainError};

/// Errors raised while answering a query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Model returned an unusable plan: {0}")]
    InvalidPlan(DomainError),

    #[error("Plan could not be executed: {0}")]
    Execution(DomainError),

    #[error("Chart could not be saved: {0}")]
    ChartSave(String),
}

#[async_trait]
pub trait AnalysisAgent: Send + Sync {
    /// Answer one query about the bound dataset.
    async fn chat(&self, query: &str) -> Result<AnalysisOutcome, AgentError>;
}

/// Builds an agent for a freshly loaded dataset.
pub trait AnalysisAgentFactory: Send + Sync {
    fn build(&self, dataset: Arc<DatasetHandle>, settings: &AgentSettings) -> Arc<dyn AnalysisAgent>;
}
