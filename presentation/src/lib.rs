//! Presentation layer for datawizard
//!
//! This crate contains CLI definitions, the transcript renderer, console
//! formatting, progress reporters, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{CHART_CAPTION, ChatRenderer, ChatRepl};
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
