//! Progress notification port
//!
//! Defines the interface for reporting progress while a query cycle is
//! blocked on remote calls.

use wizard_domain::CycleState;

/// Callback for progress updates during a query cycle
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, ...).
pub trait CycleProgressNotifier: Send + Sync {
    /// Called on every state transition of the cycle
    fn on_state(&self, state: CycleState);

    /// Called once when the cycle is over, whatever the outcome
    fn on_cycle_end(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl CycleProgressNotifier for NoProgress {
    fn on_state(&self, _state: CycleState) {}
}
