//! Infrastructure layer for datawizard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod agent;
pub mod charts;
pub mod completion;
pub mod config;
pub mod dataset;
pub mod logging;

// Re-export commonly used types
pub use agent::{LlmAnalysisAgent, LlmAnalysisAgentFactory};
pub use charts::{ChartRenderError, ChartRenderer, PngChartLoader};
pub use completion::gateway::ChatCompletionGateway;
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileLoggingConfig,
    FileReplConfig, FileServiceConfig, ServiceEndpoint,
};
pub use dataset::CsvDatasetLoader;
pub use logging::JsonlConversationLogger;
