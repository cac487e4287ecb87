//! Agent configuration from TOML (`[agent]` section)

use serde::{Deserialize, Serialize};
use wizard_application::AgentSettings;

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// save_charts = true
/// verbose = true
/// enable_cache = false
/// charts_dir = "exports/charts"
/// sample_rows = 3
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Render chart plans to PNG files
    pub save_charts: bool,
    /// Log plans at info level
    pub verbose: bool,
    /// Serve repeated queries from memory
    pub enable_cache: bool,
    /// Where charts are written
    pub charts_dir: String,
    /// Leading rows included in the answer model's system prompt
    pub sample_rows: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let defaults = AgentSettings::default();
        Self {
            save_charts: defaults.save_charts,
            verbose: defaults.verbose,
            enable_cache: defaults.enable_cache,
            charts_dir: defaults.charts_dir.to_string_lossy().into_owned(),
            sample_rows: defaults.sample_rows,
        }
    }
}

impl FileAgentConfig {
    pub fn to_settings(&self) -> AgentSettings {
        AgentSettings::default()
            .with_save_charts(self.save_charts)
            .with_verbose(self.verbose)
            .with_cache(self.enable_cache)
            .with_charts_dir(&self.charts_dir)
            .with_sample_rows(self.sample_rows)
    }
}
