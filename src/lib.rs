//! Intake Core - Self-service intake and triage scoring engine.
//!
//! A multi-step questionnaire engine for clinic intake flows: it collects
//! structured answers, computes a normalized risk score with per-category
//! sub-scores, detects safety-critical answer combinations that override the
//! normal result, and gates generated follow-up content on the caller's
//! authentication state. Pure in-process library; rendering, auth, and
//! persistence belong to the callers.

pub mod config;
pub mod domain;
