//! Prompt domain
//!
//! System prompts for the two models: the relevance classifier and the
//! analysis planner.

pub mod analysis;
pub mod relevance;

pub use analysis::analysis_system_prompt;
pub use relevance::{RELEVANCE_INSTRUCTION, relevance_system_prompt};
