//! Questionnaire configuration module.
//!
//! Per-tenant definition tables are data, not code: each department ships a
//! YAML (or JSON) document describing its steps, weights, red flags,
//! categories, and follow-up candidates. Loading parses the document and
//! validates it eagerly, so the engine only ever sees well-formed tables.

mod error;
mod loader;
mod sample;

pub use error::ConfigError;
pub use loader::{questionnaire_from_json, questionnaire_from_yaml};
pub use sample::headache_triage;
