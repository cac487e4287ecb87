//! Domain layer for datawizard
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Cycle
//!
//! One user question runs one cycle: the relevance classifier decides
//! whether the question is about the loaded table, then either its canned
//! reply or the analysis agent's answer is recorded in the transcript.
//!
//! ## Transcript
//!
//! Messages are kept newest first. A message carries exactly one payload,
//! text or a chart image.

pub mod analysis;
pub mod core;
pub mod cycle;
pub mod dataset;
pub mod prompt;
pub mod relevance;
pub mod session;

// Re-export commonly used types
pub use analysis::{
    chart::{ChartData, ChartSeries},
    executor::{PlanExecutor, PlanOutput},
    outcome::{AnalysisOutcome, CHART_EXTENSION, StructuredValue},
    plan::{AggregateOp, AnalysisPlan, ChartKind, Filter, FilterOp, parse_plan},
};
pub use core::{
    error::DomainError,
    string::{format_number, truncate},
};
pub use cycle::CycleState;
pub use dataset::entities::{ColumnKind, DatasetHandle, series_f64, series_text};
pub use prompt::{analysis_system_prompt, relevance_system_prompt};
pub use relevance::verdict::RelevanceVerdict;
pub use session::{
    entities::{ChartImage, Message, Payload, Role},
    transcript::{ChatSession, Transcript},
};
