//! Results returned by the analysis agent

use crate::core::string::format_number;
use polars::prelude::DataFrame;
use std::fmt;
use std::path::PathBuf;

/// File extension that marks a generated chart
pub const CHART_EXTENSION: &str = ".png";

/// A non-text result that is shown to the user in its string form
#[derive(Debug, Clone)]
pub enum StructuredValue {
    Integer(i64),
    Float(f64),
    Table(DataFrame),
}

impl PartialEq for StructuredValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StructuredValue::Integer(a), StructuredValue::Integer(b)) => a == b,
            (StructuredValue::Float(a), StructuredValue::Float(b)) => a == b,
            (StructuredValue::Table(a), StructuredValue::Table(b)) => a.equals_missing(b),
            _ => false,
        }
    }
}

impl fmt::Display for StructuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuredValue::Integer(v) => write!(f, "{}", v),
            StructuredValue::Float(v) => write!(f, "{}", format_number(*v)),
            StructuredValue::Table(table) => write!(f, "{}", table),
        }
    }
}

impl From<i64> for StructuredValue {
    fn from(value: i64) -> Self {
        StructuredValue::Integer(value)
    }
}

impl From<f64> for StructuredValue {
    fn from(value: f64) -> Self {
        StructuredValue::Float(value)
    }
}

impl From<DataFrame> for StructuredValue {
    fn from(value: DataFrame) -> Self {
        StructuredValue::Table(value)
    }
}

/// What the analysis agent produced for one query.
///
/// The agent stamps the variant at the point where it knows whether a
/// chart was actually rendered, so downstream code never has to guess
/// from the shape of a string.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// A natural-language answer
    Text(String),
    /// Path of a freshly rendered chart image
    Image(PathBuf),
    /// A structured value (number, table, ...)
    Other(StructuredValue),
}

impl AnalysisOutcome {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisOutcome::Text(_) => "text",
            AnalysisOutcome::Image(_) => "image",
            AnalysisOutcome::Other(_) => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series};

    #[test]
    fn test_structured_display() {
        assert_eq!(StructuredValue::from(42i64).to_string(), "42");
        assert_eq!(StructuredValue::from(42.0).to_string(), "42");
        assert_eq!(StructuredValue::from(3.25).to_string(), "3.25");
    }

    #[test]
    fn test_table_displays_through_polars() {
        let frame = DataFrame::new(vec![
            Series::new("city", &["Oslo", "Lima"]),
            Series::new("count", &[3i64, 1]),
        ])
        .unwrap();
        let shown = StructuredValue::from(frame.clone()).to_string();
        assert_eq!(shown, frame.to_string());
        assert!(shown.contains("Oslo"));
        assert!(shown.contains("count"));
    }

    #[test]
    fn test_tables_compare_by_content() {
        let frame = |v: i64| DataFrame::new(vec![Series::new("n", &[v])]).unwrap();
        assert_eq!(StructuredValue::Table(frame(1)), StructuredValue::Table(frame(1)));
        assert_ne!(StructuredValue::Table(frame(1)), StructuredValue::Table(frame(2)));
        assert_ne!(StructuredValue::Table(frame(1)), StructuredValue::Integer(1));
    }
}
