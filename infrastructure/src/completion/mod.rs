//! OpenAI-compatible chat completion adapter
//!
//! Both hosted services (Together for relevance, Groq for answers) speak the
//! same `/chat/completions` protocol, so one gateway type serves both.

pub mod gateway;
pub mod protocol;
