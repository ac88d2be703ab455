//! Questionnaire definition tables.
//!
//! Definitions are static declarative data supplied per tenant (department,
//! specialty). The engine treats them as data only; no per-tenant branching
//! logic lives here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{ConfigurationError, OptionId, QuestionId};
use crate::domain::scoring::CategoryDefinition;

/// Number of follow-up candidates unlocked regardless of authentication,
/// used when a definition does not override it.
pub const DEFAULT_FREE_FOLLOW_UPS: usize = 2;

/// One selectable option within a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDefinition {
    /// Stable id, unique within the owning question.
    pub id: OptionId,

    /// Display label.
    pub label: String,

    /// Contribution to the overall weighted score when selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    /// Marks a safety-critical answer that overrides the normal result flow.
    #[serde(default)]
    pub is_red_flag: bool,

    /// Marks the "none of the above" sentinel, mutually exclusive with every
    /// other option of the same question.
    #[serde(default)]
    pub is_exclusive: bool,
}

impl OptionDefinition {
    /// Creates a plain option with no weight.
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            weight: None,
            is_red_flag: false,
            is_exclusive: false,
        }
    }

    /// Sets the scoring weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Marks the option as a red flag.
    pub fn red_flag(mut self) -> Self {
        self.is_red_flag = true;
        self
    }

    /// Marks the option as the exclusive "none of the above" sentinel.
    pub fn exclusive(mut self) -> Self {
        self.is_exclusive = true;
        self
    }
}

/// Continuous input attached to a hybrid question (e.g. a severity slider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleDefinition {
    pub min: f64,
    pub max: f64,

    /// Unit label for display ("days", "out of 10").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// One step of the questionnaire.
///
/// # Invariants
///
/// - `id` is unique within the questionnaire
/// - `options` is non-empty
/// - at most one option is marked exclusive
/// - a scale, when present, has `min < max`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    /// Stable id, unique within the questionnaire.
    pub id: QuestionId,

    /// Prompt shown to the user.
    pub prompt: String,

    /// Optional explanatory copy under the prompt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Whether any subset of options may be selected.
    #[serde(default)]
    pub multi_select: bool,

    /// Ordered selectable options.
    pub options: Vec<OptionDefinition>,

    /// Present on hybrid steps that combine a choice with a slider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleDefinition>,
}

impl QuestionDefinition {
    /// Creates a single-select question.
    pub fn single(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: Vec<OptionDefinition>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            help_text: None,
            multi_select: false,
            options,
            scale: None,
        }
    }

    /// Creates a multi-select question.
    pub fn multi(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: Vec<OptionDefinition>,
    ) -> Self {
        Self {
            multi_select: true,
            ..Self::single(id, prompt, options)
        }
    }

    /// Attaches a continuous scale, turning this into a hybrid step.
    pub fn with_scale(mut self, min: f64, max: f64, unit: Option<&str>) -> Self {
        self.scale = Some(ScaleDefinition {
            min,
            max,
            unit: unit.map(str::to_string),
        });
        self
    }

    /// Sets the help text.
    pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// True when the step combines a discrete choice with a scalar input.
    pub fn is_hybrid(&self) -> bool {
        self.scale.is_some()
    }

    /// Looks up an option by id.
    pub fn option(&self, id: &OptionId) -> Option<&OptionDefinition> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Returns the exclusive sentinel option, when declared.
    pub fn exclusive_option(&self) -> Option<&OptionDefinition> {
        self.options.iter().find(|o| o.is_exclusive)
    }

    /// True when any option of this question carries a weight.
    pub fn is_weighted(&self) -> bool {
        self.options.iter().any(|o| o.weight.is_some())
    }

    /// Maximum weight achievable on this question by a valid selection.
    ///
    /// Single-select and hybrid steps can pick one option, so the maximum is
    /// the largest option weight. Multi-select steps can pick every
    /// non-exclusive option at once; the sentinel competes on its own since
    /// it cannot be combined with anything else.
    pub fn max_achievable_weight(&self) -> u32 {
        if self.multi_select {
            let combined: u32 = self
                .options
                .iter()
                .filter(|o| !o.is_exclusive)
                .filter_map(|o| o.weight)
                .sum();
            let sentinel = self
                .exclusive_option()
                .and_then(|o| o.weight)
                .unwrap_or(0);
            combined.max(sentinel)
        } else {
            self.options.iter().filter_map(|o| o.weight).max().unwrap_or(0)
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.options.is_empty() {
            return Err(ConfigurationError::EmptyOptions {
                question_id: self.id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(&option.id) {
                return Err(ConfigurationError::DuplicateOptionId {
                    question_id: self.id.to_string(),
                    option_id: option.id.to_string(),
                });
            }
        }

        if self.options.iter().filter(|o| o.is_exclusive).count() > 1 {
            return Err(ConfigurationError::MultipleExclusiveOptions {
                question_id: self.id.to_string(),
            });
        }

        if let Some(scale) = &self.scale {
            if scale.min >= scale.max {
                return Err(ConfigurationError::InvalidScale {
                    question_id: self.id.to_string(),
                    min: scale.min,
                    max: scale.max,
                });
            }
        }

        Ok(())
    }
}

/// A complete per-tenant questionnaire: ordered steps, scoring categories,
/// follow-up candidates, and the disclosure constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireDefinition {
    /// Stable id of this questionnaire (one per department/specialty).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Ordered steps.
    pub questions: Vec<QuestionDefinition>,

    /// Scoring categories evaluated independently of the weighted score.
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,

    /// Candidate follow-up / clinician-question strings, in display order.
    #[serde(default)]
    pub follow_ups: Vec<String>,

    /// How many follow-up candidates are unlocked for everyone.
    #[serde(default = "default_free_follow_ups")]
    pub free_follow_ups: usize,

    /// Override notice shown when a red flag is detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_notice: Option<String>,
}

fn default_free_follow_ups() -> usize {
    DEFAULT_FREE_FOLLOW_UPS
}

impl QuestionnaireDefinition {
    /// Validates the whole definition table.
    ///
    /// Called eagerly when a definition is loaded so that scoring and
    /// detection never operate on malformed data.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.questions.is_empty() {
            return Err(ConfigurationError::EmptyQuestionnaire {
                questionnaire_id: self.id.clone(),
            });
        }

        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(&question.id) {
                return Err(ConfigurationError::DuplicateQuestionId {
                    question_id: question.id.to_string(),
                });
            }
            question.validate()?;
        }

        let mut category_ids = HashSet::new();
        for category in &self.categories {
            if !category_ids.insert(&category.id) {
                return Err(ConfigurationError::DuplicateCategoryId {
                    category_id: category.id.to_string(),
                });
            }
            category.validate(self)?;
        }

        Ok(())
    }

    /// Returns the number of steps.
    pub fn step_count(&self) -> usize {
        self.questions.len()
    }

    /// Returns the question at the given step index.
    pub fn question_at(&self, index: usize) -> Option<&QuestionDefinition> {
        self.questions.get(index)
    }

    /// Looks up a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Returns the step index of a question id.
    pub fn index_of(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| &q.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_option_question(id: &str) -> QuestionDefinition {
        QuestionDefinition::single(
            id,
            "Prompt",
            vec![
                OptionDefinition::new("a", "A"),
                OptionDefinition::new("b", "B"),
            ],
        )
    }

    fn minimal_definition() -> QuestionnaireDefinition {
        QuestionnaireDefinition {
            id: "demo".into(),
            title: "Demo".into(),
            questions: vec![two_option_question("q1")],
            categories: vec![],
            follow_ups: vec![],
            free_follow_ups: DEFAULT_FREE_FOLLOW_UPS,
            safety_notice: None,
        }
    }

    #[test]
    fn valid_definition_passes() {
        assert!(minimal_definition().validate().is_ok());
    }

    #[test]
    fn empty_questionnaire_is_rejected() {
        let mut def = minimal_definition();
        def.questions.clear();
        assert!(matches!(
            def.validate(),
            Err(ConfigurationError::EmptyQuestionnaire { .. })
        ));
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let mut def = minimal_definition();
        def.questions.push(two_option_question("q1"));
        assert!(matches!(
            def.validate(),
            Err(ConfigurationError::DuplicateQuestionId { .. })
        ));
    }

    #[test]
    fn question_without_options_is_rejected() {
        let mut def = minimal_definition();
        def.questions[0].options.clear();
        assert!(matches!(
            def.validate(),
            Err(ConfigurationError::EmptyOptions { .. })
        ));
    }

    #[test]
    fn duplicate_option_ids_are_rejected() {
        let mut def = minimal_definition();
        def.questions[0]
            .options
            .push(OptionDefinition::new("a", "A again"));
        assert!(matches!(
            def.validate(),
            Err(ConfigurationError::DuplicateOptionId { .. })
        ));
    }

    #[test]
    fn two_exclusive_options_are_rejected() {
        let mut def = minimal_definition();
        def.questions[0].options = vec![
            OptionDefinition::new("none", "None").exclusive(),
            OptionDefinition::new("also-none", "Also none").exclusive(),
        ];
        assert!(matches!(
            def.validate(),
            Err(ConfigurationError::MultipleExclusiveOptions { .. })
        ));
    }

    #[test]
    fn inverted_scale_is_rejected() {
        let mut def = minimal_definition();
        def.questions[0] = two_option_question("q1").with_scale(10.0, 1.0, None);
        assert!(matches!(
            def.validate(),
            Err(ConfigurationError::InvalidScale { .. })
        ));
    }

    #[test]
    fn max_achievable_weight_single_select_is_largest_option() {
        let q = QuestionDefinition::single(
            "q",
            "Prompt",
            vec![
                OptionDefinition::new("none", "None").with_weight(0),
                OptionDefinition::new("mild", "Mild").with_weight(1),
                OptionDefinition::new("severe", "Severe").with_weight(3),
            ],
        );
        assert_eq!(q.max_achievable_weight(), 3);
    }

    #[test]
    fn max_achievable_weight_multi_select_sums_combinable_options() {
        let q = QuestionDefinition::multi(
            "q",
            "Prompt",
            vec![
                OptionDefinition::new("a", "A").with_weight(2),
                OptionDefinition::new("b", "B").with_weight(3),
                OptionDefinition::new("none", "None").with_weight(0).exclusive(),
            ],
        );
        assert_eq!(q.max_achievable_weight(), 5);
    }

    #[test]
    fn unweighted_question_contributes_zero() {
        let q = two_option_question("q");
        assert!(!q.is_weighted());
        assert_eq!(q.max_achievable_weight(), 0);
    }

    #[test]
    fn definition_round_trips_through_json() {
        let def = minimal_definition();
        let json = serde_json::to_string(&def).unwrap();
        let back: QuestionnaireDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, back);
    }
}
