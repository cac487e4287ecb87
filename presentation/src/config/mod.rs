//! Presentation-level configuration

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show the spinner while a query runs
    pub show_progress: bool,
    /// Path to history file (defaults to the user data directory)
    pub history_file: Option<PathBuf>,
    /// Rows shown after a CSV is loaded
    pub preview_rows: usize,
    /// Redraw the whole transcript after each question; otherwise print
    /// only the newest message
    pub full_transcript: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            preview_rows: 3,
            full_transcript: true,
        }
    }
}

impl ReplConfig {
    /// Set the history file from a config string; a leading `~/` is the home directory
    pub fn with_history_file(mut self, path: Option<&str>) -> Self {
        self.history_file = path.map(expand_home);
        self
    }

    /// History file to use: the configured one, else `<data dir>/datawizard/history.txt`
    pub fn resolved_history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("datawizard").join("history.txt")))
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_file_expands_home() {
        let config = ReplConfig::default().with_history_file(Some("~/.datawizard_history"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.history_file, Some(home.join(".datawizard_history")));
        }

        let config = ReplConfig::default().with_history_file(Some("/tmp/history.txt"));
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/history.txt")));
    }

    #[test]
    fn test_default_history_under_data_dir() {
        if let Some(path) = ReplConfig::default().resolved_history_file() {
            assert!(path.ends_with("datawizard/history.txt"));
        }
    }
}
