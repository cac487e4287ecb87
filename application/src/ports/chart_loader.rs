//! Chart loader port
//!
//! Opens a chart image written by the analysis agent and re-encodes it into
//! an in-memory buffer, so the transcript never depends on the file staying
//! on disk.

use std::path::{Path, PathBuf};
use thiserror::Error;
use wizard_domain::ChartImage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartLoadError {
    #[error("Chart file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Chart file {} is not a decodable image: {reason}", .path.display())]
    Undecodable { path: PathBuf, reason: String },

    #[error("Failed to encode chart: {0}")]
    Encode(String),
}

pub trait ChartLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<ChartImage, ChartLoadError>;
}
