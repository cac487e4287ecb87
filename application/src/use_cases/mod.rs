//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classify_relevance;
pub mod cycle_error;
pub mod load_dataset;
pub mod normalize_response;
pub mod run_cycle;
