//! Analysis domain.
//!
//! - [`plan::AnalysisPlan`]: closed vocabulary the answer model replies with
//! - [`executor::PlanExecutor`]: evaluates a plan against a dataset
//! - [`chart::ChartData`]: chart values ready to be drawn
//! - [`outcome::AnalysisOutcome`]: text / image / structured result of a query

pub mod chart;
pub mod executor;
pub mod outcome;
pub mod plan;
