//! Session phases for the intake flow.
//!
//! A session moves `Idle → Collecting → Scoring → Result`. Scoring is
//! transient: `finish()` passes through it synchronously, so callers never
//! observe a session parked in `Scoring`. Any "analysing..." delay shown to
//! the user is a presentation-layer effect, not engine state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Lifecycle phase of one intake session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Flow not started, or backed out of the first step to the intro.
    Idle,

    /// Stepping through the questionnaire.
    Collecting,

    /// Transient: scores and red flags are being computed.
    Scoring,

    /// Terminal: the outcome is available.
    Result,
}

impl SessionPhase {
    /// Returns a display label for the phase.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Collecting => "collecting",
            Self::Scoring => "scoring",
            Self::Result => "result",
        }
    }

    /// Returns all valid target phases from this phase.
    pub fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Idle => vec![Self::Collecting],
            // Collecting can back out to the intro or move on to scoring.
            Self::Collecting => vec![Self::Idle, Self::Scoring],
            Self::Scoring => vec![Self::Result],
            Self::Result => vec![],
        }
    }

    /// Returns true if a transition to the target phase is valid.
    pub fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs a validated transition.
    pub fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::InvalidPhaseTransition {
                from: self.label().to_string(),
                to: target.label().to_string(),
            })
        }
    }

    /// True when no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Idle
    }
}
