//! Analysis plan vocabulary.
//!
//! The answer model never runs code directly; it replies with one JSON
//! plan from this closed vocabulary, which the local executor evaluates
//! against the loaded table.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Aggregation applied to a numeric column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
    Mean,
    Min,
    Max,
    Count,
    Median,
}

impl AggregateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Mean => "mean",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Count => "count",
            AggregateOp::Median => "median",
        }
    }
}

/// Comparison used by a row filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    Contains,
}

/// Keep only rows whose `column` satisfies `op value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Histogram,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
        }
    }
}

fn default_top_n() -> usize {
    5
}

fn default_descending() -> bool {
    true
}

/// One step of analysis proposed by the answer model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPlan {
    /// Reply in prose without touching the data (greetings, definitions)
    Answer { text: String },
    CountRows {
        #[serde(default)]
        filters: Vec<Filter>,
    },
    Aggregate {
        op: AggregateOp,
        column: String,
        #[serde(default)]
        group_by: Option<String>,
        #[serde(default)]
        filters: Vec<Filter>,
    },
    Describe {
        #[serde(default)]
        columns: Vec<String>,
    },
    ValueCounts {
        column: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    Top {
        column: String,
        #[serde(default = "default_top_n")]
        n: usize,
        #[serde(default = "default_descending")]
        descending: bool,
        #[serde(default)]
        filters: Vec<Filter>,
    },
    Chart {
        chart: ChartKind,
        x: String,
        #[serde(default)]
        y: Option<String>,
        #[serde(default)]
        agg: Option<AggregateOp>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        filters: Vec<Filter>,
    },
}

impl AnalysisPlan {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisPlan::Answer { .. } => "answer",
            AnalysisPlan::CountRows { .. } => "count_rows",
            AnalysisPlan::Aggregate { .. } => "aggregate",
            AnalysisPlan::Describe { .. } => "describe",
            AnalysisPlan::ValueCounts { .. } => "value_counts",
            AnalysisPlan::Top { .. } => "top",
            AnalysisPlan::Chart { .. } => "chart",
        }
    }
}

/// Extract and parse a plan from a model response.
///
/// Accepts a bare JSON object or one wrapped in a markdown code fence
/// and surrounded by prose.
pub fn parse_plan(response: &str) -> Result<AnalysisPlan, DomainError> {
    let start = response.find('{');
    let end = response.rfind('}');
    let json = match (start, end) {
        (Some(s), Some(e)) if s < e => &response[s..=e],
        _ => {
            return Err(DomainError::InvalidPlan(format!(
                "no JSON object in response: {}",
                crate::core::string::truncate(response.trim(), 200)
            )));
        }
    };

    serde_json::from_str(json).map_err(|e| DomainError::InvalidPlan(e.to_string()))
}
