//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod analysis_agent;
pub mod chart_loader;
pub mod conversation_logger;
pub mod dataset_loader;
pub mod llm_gateway;
pub mod progress;
