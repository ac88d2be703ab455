//! Configuration error types.

use thiserror::Error;

use crate::domain::foundation::ConfigurationError;

/// Errors that can occur while loading a questionnaire definition.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse questionnaire definition: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse questionnaire definition: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
