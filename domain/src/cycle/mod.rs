//! Query cycle state machine.
//!
//! One cycle is `Idle → Submitted → Classifying → {Rejected | Analyzing} →
//! Normalizing → Recorded → Idle`. `Rejected` skips analysis but still ends
//! at `Recorded`; errors jump straight to `Recorded` without new entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleState {
    Idle,
    Submitted,
    Classifying,
    Rejected,
    Analyzing,
    Normalizing,
    Recorded,
}

impl CycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleState::Idle => "idle",
            CycleState::Submitted => "submitted",
            CycleState::Classifying => "classifying",
            CycleState::Rejected => "rejected",
            CycleState::Analyzing => "analyzing",
            CycleState::Normalizing => "normalizing",
            CycleState::Recorded => "recorded",
        }
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: CycleState) -> bool {
        use CycleState::*;
        matches!(
            (self, next),
            (Idle, Submitted)
                | (Submitted, Classifying)
                | (Classifying, Rejected)
                | (Classifying, Analyzing)
                | (Classifying, Recorded)
                | (Rejected, Recorded)
                | (Analyzing, Normalizing)
                | (Analyzing, Recorded)
                | (Normalizing, Recorded)
                | (Recorded, Idle)
        )
    }
}

impl std::fmt::Display for CycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            CycleState::Idle,
            CycleState::Submitted,
            CycleState::Classifying,
            CycleState::Analyzing,
            CycleState::Normalizing,
            CycleState::Recorded,
            CycleState::Idle,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_rejected_skips_analysis() {
        assert!(CycleState::Classifying.can_transition_to(CycleState::Rejected));
        assert!(CycleState::Rejected.can_transition_to(CycleState::Recorded));
        assert!(!CycleState::Rejected.can_transition_to(CycleState::Analyzing));
    }

    #[test]
    fn test_no_retry_state() {
        assert!(!CycleState::Recorded.can_transition_to(CycleState::Classifying));
        assert!(!CycleState::Analyzing.can_transition_to(CycleState::Classifying));
    }
}
