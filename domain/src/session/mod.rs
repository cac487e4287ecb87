//! Chat session domain.
//!
//! - [`entities::Message`]: a single transcript entry (text or chart image)
//! - [`transcript::Transcript`]: messages ordered newest first
//! - [`transcript::ChatSession`]: transcript plus pending input for one session

pub mod entities;
pub mod transcript;
