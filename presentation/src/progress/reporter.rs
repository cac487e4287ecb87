//! Progress reporting for query cycles

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use wizard_application::ports::progress::CycleProgressNotifier;
use wizard_domain::CycleState;

const WORKING_MESSAGE: &str = "Generating response...";

/// Shows a spinner from submission until the cycle is recorded
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    show_states: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            show_states: false,
        }
    }

    /// Show the current cycle state next to the spinner message
    pub fn with_states(mut self, show: bool) -> Self {
        self.show_states = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn message(&self, state: CycleState) -> String {
        if self.show_states {
            format!("{} {}", WORKING_MESSAGE, format!("({})", state).dimmed())
        } else {
            WORKING_MESSAGE.to_string()
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleProgressNotifier for ProgressReporter {
    fn on_state(&self, state: CycleState) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        match state {
            CycleState::Submitted => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.set_message(self.message(state));
                pb.enable_steady_tick(Duration::from_millis(100));
                *slot = Some(pb);
            }
            CycleState::Idle => {
                if let Some(pb) = slot.take() {
                    pb.finish_and_clear();
                }
            }
            _ => {
                if let Some(pb) = slot.as_ref() {
                    pb.set_message(self.message(state));
                }
            }
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl CycleProgressNotifier for SimpleProgress {
    fn on_state(&self, state: CycleState) {
        if state == CycleState::Submitted {
            println!("{} {}", "->".cyan(), WORKING_MESSAGE);
        }
    }

    fn on_cycle_end(&self, success: bool) {
        if !success {
            println!("  {} failed", "x".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_state(CycleState::Submitted);
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_state(CycleState::Classifying);
        reporter.on_state(CycleState::Recorded);
        reporter.on_state(CycleState::Idle);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_message_is_constant_by_default() {
        let reporter = ProgressReporter::new();
        assert_eq!(reporter.message(CycleState::Analyzing), "Generating response...");
    }
}
