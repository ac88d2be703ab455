//! Loading of per-tenant questionnaire definition tables.
//!
//! Definitions arrive as YAML or JSON documents (one per department or
//! specialty) and are validated eagerly: a table that parses but references
//! unknown ids never reaches the engine.

use crate::domain::questionnaire::QuestionnaireDefinition;

use super::error::ConfigError;

/// Parses and validates a definition from a YAML document.
pub fn questionnaire_from_yaml(input: &str) -> Result<QuestionnaireDefinition, ConfigError> {
    let definition: QuestionnaireDefinition = serde_yaml::from_str(input)?;
    definition.validate()?;
    tracing::info!(
        questionnaire = %definition.id,
        steps = definition.step_count(),
        categories = definition.categories.len(),
        "loaded questionnaire definition"
    );
    Ok(definition)
}

/// Parses and validates a definition from a JSON document.
pub fn questionnaire_from_json(input: &str) -> Result<QuestionnaireDefinition, ConfigError> {
    let definition: QuestionnaireDefinition = serde_json::from_str(input)?;
    definition.validate()?;
    tracing::info!(
        questionnaire = %definition.id,
        steps = definition.step_count(),
        categories = definition.categories.len(),
        "loaded questionnaire definition"
    );
    Ok(definition)
}
