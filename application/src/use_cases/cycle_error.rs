//! Errors surfaced to the user at the cycle boundary.

use super::classify_relevance::ClassifyError;
use crate::ports::analysis_agent::AgentError;
use crate::ports::chart_loader::ChartLoadError;
use crate::ports::dataset_loader::DatasetLoadError;
use crate::ports::llm_gateway::GatewayError;
use thiserror::Error;
use wizard_domain::DomainError;

/// Every failure inside a cycle (or an upload) ends up as one of these.
///
/// None of them is retried, and none of them touches the transcript.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("No dataset loaded. Load a CSV file first.")]
    NoDataset,

    #[error("Relevance check failed: {0}")]
    ClassifierUnavailable(GatewayError),

    #[error("Malformed classifier response: {0}")]
    MalformedClassifierResponse(DomainError),

    #[error("Analysis failed: {0}")]
    AnalysisAgentFailure(AgentError),

    #[error("Failed to render chart: {0}")]
    ChartRenderFailure(ChartLoadError),

    #[error("Failed to load CSV: {0}")]
    UploadParseFailure(DatasetLoadError),
}

impl CycleError {
    /// Stable identifier for logs
    pub fn kind(&self) -> &'static str {
        match self {
            CycleError::NoDataset => "no_dataset",
            CycleError::ClassifierUnavailable(_) => "classifier_unavailable",
            CycleError::MalformedClassifierResponse(_) => "malformed_classifier_response",
            CycleError::AnalysisAgentFailure(_) => "analysis_agent_failure",
            CycleError::ChartRenderFailure(_) => "chart_render_failure",
            CycleError::UploadParseFailure(_) => "upload_parse_failure",
        }
    }
}

impl From<ClassifyError> for CycleError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::GatewayError(e) => CycleError::ClassifierUnavailable(e),
            ClassifyError::Malformed(e) => CycleError::MalformedClassifierResponse(e),
        }
    }
}

impl From<AgentError> for CycleError {
    fn from(err: AgentError) -> Self {
        CycleError::AnalysisAgentFailure(err)
    }
}

impl From<ChartLoadError> for CycleError {
    fn from(err: ChartLoadError) -> Self {
        CycleError::ChartRenderFailure(err)
    }
}

impl From<DatasetLoadError> for CycleError {
    fn from(err: DatasetLoadError) -> Self {
        CycleError::UploadParseFailure(err)
    }
}
