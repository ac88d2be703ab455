//! Disclosure module - follow-up gating and final result composition.

mod composer;
mod gate;

pub use composer::{
    AnswerSummaryEntry, ResultArtifact, ResultComposer, SafetyNotice, DEFAULT_SAFETY_NOTICE,
};
pub use gate::{DisclosureGate, FollowUpItem, FollowUpList};
