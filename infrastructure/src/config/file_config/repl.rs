//! Interactive session settings from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
///
/// # Example
///
/// ```toml
/// [repl]
/// preview_rows = 5
/// full_transcript = false
/// history_file = "~/.datawizard_history"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show the spinner while a query runs
    pub show_progress: bool,
    /// Path to history file; `~/` expands to the home directory
    pub history_file: Option<String>,
    /// Rows shown right after a CSV is loaded and by `/preview`
    pub preview_rows: usize,
    /// Redraw the whole transcript after each question instead of
    /// printing only the newest message
    pub full_transcript: bool,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            preview_rows: 3,
            full_transcript: true,
        }
    }
}
