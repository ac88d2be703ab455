//! Scoring module - pure domain services over completed answers.
//!
//! All functions here are stateless and deterministic: they take the
//! definition tables and an answer set and return computed results, with no
//! I/O and no shared state.
//!
//! # Components
//!
//! - `ScoringEngine` - weighted overall score plus category sub-scores
//! - `RedFlagDetector` - safety-critical answer detection, independent of
//!   the scoring math
//! - `CategoryDefinition` / `CategoryRule` - declarative per-category rules

mod categories;
mod engine;
mod red_flags;

pub use categories::{CategoryDefinition, CategoryRule, CategoryScore};
pub use engine::{ScoreResult, ScoringEngine};
pub use red_flags::{RedFlagDetector, RedFlagMatch, RedFlagOutcome};
