//! Port for structured conversation logging.
//!
//! Records what happened in each query cycle (query, verdict, result kind,
//! errors) as machine-readable events. This is separate from `tracing`:
//! tracing carries human-readable diagnostics, this port carries the
//! cycle record.

use serde_json::Value;

/// A structured cycle event.
pub struct ConversationEvent {
    /// Event type identifier: `user_query`, `verdict`, `analysis_result`, `cycle_error`.
    pub event_type: &'static str,
    /// Event-specific fields.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for conversation events.
///
/// `log` is synchronous and infallible: a broken log must never fail a cycle.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
