//! Interactive chat module
//!
//! Provides a line-editor based REPL and the transcript renderer.

mod renderer;
mod repl;

pub use renderer::{CHART_CAPTION, ChatRenderer};
pub use repl::ChatRepl;
