//! Application layer for datawizard
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AgentSettings, BehaviorConfig};
pub use ports::{
    analysis_agent::{AgentError, AnalysisAgent, AnalysisAgentFactory},
    chart_loader::{ChartLoadError, ChartLoader},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    dataset_loader::{DatasetLoadError, DatasetLoader},
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    progress::{CycleProgressNotifier, NoProgress},
};
pub use session::{LoadedDataset, SessionContext};
pub use use_cases::classify_relevance::{ClassifyError, ClassifyRelevanceUseCase};
pub use use_cases::cycle_error::CycleError;
pub use use_cases::load_dataset::LoadDatasetUseCase;
pub use use_cases::normalize_response::ResponseNormalizer;
pub use use_cases::run_cycle::{CycleResult, RunCycleUseCase};
