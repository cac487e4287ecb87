//! Analysis agent settings.
//!
//! [`AgentSettings`] groups the flags an analysis agent is constructed with.
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Construction parameters for an analysis agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Render chart plans to PNG files (otherwise charts are summarized as text).
    pub save_charts: bool,
    /// Directory that receives generated charts.
    pub charts_dir: PathBuf,
    /// Log generated plans and results at info level.
    pub verbose: bool,
    /// Serve repeated queries from an in-memory cache.
    pub enable_cache: bool,
    /// Number of sample rows shown to the answer model.
    pub sample_rows: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            save_charts: true,
            charts_dir: PathBuf::from("exports/charts"),
            verbose: true,
            enable_cache: false,
            sample_rows: 3,
        }
    }
}

impl AgentSettings {
    // ==================== Builder Methods ====================

    pub fn with_save_charts(mut self, save: bool) -> Self {
        self.save_charts = save;
        self
    }

    pub fn with_charts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charts_dir = dir.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_sample_rows(mut self, rows: usize) -> Self {
        self.sample_rows = rows;
        self
    }
}
