//! Analysis agent backed by the answer model
//!
//! The model proposes one analysis plan per query; the plan is executed
//! locally against the loaded table.

mod llm_agent;

pub use llm_agent::{LlmAnalysisAgent, LlmAnalysisAgentFactory};
