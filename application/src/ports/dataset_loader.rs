//! Dataset loader port
//!
//! Parses an uploaded CSV file into a [`DatasetHandle`]. A failed parse
//! never yields a partial dataset.

use std::path::Path;
use thiserror::Error;
use wizard_domain::{DatasetHandle, DomainError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DatasetLoadError {
    #[error("Failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed CSV at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("{0}")]
    Domain(#[from] DomainError),
}

pub trait DatasetLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<DatasetHandle, DatasetLoadError>;
}
