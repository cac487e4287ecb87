//! Domain error types

use polars::prelude::PolarsError;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid relevance verdict: {0}")]
    InvalidVerdict(String),

    #[error("Invalid analysis plan: {0}")]
    InvalidPlan(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column '{0}' has no numeric values")]
    NonNumericColumn(String),

    #[error("No rows with values in column '{0}'")]
    NoMatchingRows(String),

    #[error("Dataset has no columns")]
    EmptyHeader,

    #[error("Row {row} has {found} fields, expected {expected}")]
    TooManyFields {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Table query failed: {0}")]
    Query(String),
}

impl From<PolarsError> for DomainError {
    fn from(error: PolarsError) -> Self {
        DomainError::Query(error.to_string())
    }
}

impl DomainError {
    /// Check if this error was caused by a reference to data that isn't in the table
    pub fn is_data_mismatch(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownColumn(_)
                | DomainError::NonNumericColumn(_)
                | DomainError::NoMatchingRows(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_column_display() {
        let error = DomainError::UnknownColumn("price".to_string());
        assert_eq!(error.to_string(), "Unknown column: price");
    }

    #[test]
    fn test_is_data_mismatch() {
        assert!(DomainError::UnknownColumn("a".into()).is_data_mismatch());
        assert!(DomainError::NonNumericColumn("a".into()).is_data_mismatch());
        assert!(!DomainError::EmptyHeader.is_data_mismatch());
        assert!(DomainError::NoMatchingRows("a".into()).is_data_mismatch());
        assert!(!DomainError::InvalidPlan("x".into()).is_data_mismatch());
        assert!(!DomainError::Query("x".into()).is_data_mismatch());
    }

    #[test]
    fn test_too_many_fields_display() {
        let error = DomainError::TooManyFields {
            row: 2,
            found: 3,
            expected: 2,
        };
        assert_eq!(error.to_string(), "Row 2 has 3 fields, expected 2");
    }
}
