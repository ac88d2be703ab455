//! Domain layer containing the intake engine's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, ids, errors)
//! - `questionnaire` - Definition tables, answer storage, and the step engine
//! - `scoring` - Weighted scoring, category sub-scores, red-flag detection
//! - `disclosure` - Follow-up gating and final result composition

pub mod disclosure;
pub mod foundation;
pub mod questionnaire;
pub mod scoring;
