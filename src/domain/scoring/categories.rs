//! Category definitions and their independent scoring rules.
//!
//! Categories answer "which areas need attention", separately from the
//! overall weighted score's "how urgent overall". Each category carries its
//! own declarative rule clauses and yields an independent 0-100 score; the
//! two numbers are not required to agree.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CategoryId, ConfigurationError, OptionId, QuestionId, Score};
use crate::domain::questionnaire::{AnswerSet, QuestionnaireDefinition};

/// One declarative clause of a category rule.
///
/// A clause awards its points when the predicate it describes holds over the
/// answer set. Rules are data loaded from the per-tenant tables; no code
/// runs per tenant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryRule {
    /// A specific option was selected.
    OptionSelected {
        question: QuestionId,
        option: OptionId,
        points: u32,
    },

    /// At least one of the listed options was selected.
    AnyOf {
        question: QuestionId,
        options: Vec<OptionId>,
        points: u32,
    },

    /// The scalar component of a hybrid answer reached a threshold.
    ScalarAtLeast {
        question: QuestionId,
        threshold: f64,
        points: u32,
    },
}

impl CategoryRule {
    /// Points awarded when the clause matches.
    pub fn points(&self) -> u32 {
        match self {
            Self::OptionSelected { points, .. }
            | Self::AnyOf { points, .. }
            | Self::ScalarAtLeast { points, .. } => *points,
        }
    }

    /// Evaluates the clause against an answer set.
    pub fn matches(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::OptionSelected { question, option, .. } => answers
                .get(question)
                .is_some_and(|value| value.has_option(option)),
            Self::AnyOf { question, options, .. } => answers
                .get(question)
                .is_some_and(|value| options.iter().any(|o| value.has_option(o))),
            Self::ScalarAtLeast {
                question, threshold, ..
            } => answers
                .get(question)
                .and_then(|value| value.scalar())
                .is_some_and(|scalar| scalar >= *threshold),
        }
    }

    fn validate(
        &self,
        category_id: &CategoryId,
        definition: &QuestionnaireDefinition,
    ) -> Result<(), ConfigurationError> {
        let question_id = match self {
            Self::OptionSelected { question, .. }
            | Self::AnyOf { question, .. }
            | Self::ScalarAtLeast { question, .. } => question,
        };
        let question = definition.question(question_id).ok_or_else(|| {
            ConfigurationError::UnknownRuleQuestion {
                category_id: category_id.to_string(),
                question_id: question_id.to_string(),
            }
        })?;

        let referenced: Vec<&OptionId> = match self {
            Self::OptionSelected { option, .. } => vec![option],
            Self::AnyOf { options, .. } => options.iter().collect(),
            Self::ScalarAtLeast { .. } => {
                if !question.is_hybrid() {
                    return Err(ConfigurationError::ScalarRuleOnDiscreteQuestion {
                        category_id: category_id.to_string(),
                        question_id: question_id.to_string(),
                    });
                }
                vec![]
            }
        };
        for option_id in referenced {
            if question.option(option_id).is_none() {
                return Err(ConfigurationError::UnknownRuleOption {
                    category_id: category_id.to_string(),
                    question_id: question_id.to_string(),
                    option_id: option_id.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// One scoring category of a questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Stable category id.
    pub id: CategoryId,

    /// Display label ("Sleep", "Stress load").
    pub label: String,

    /// Short guidance shown next to the score.
    pub hint: String,

    /// Rule clauses; matched points over total points gives the score.
    pub rules: Vec<CategoryRule>,
}

impl CategoryDefinition {
    /// Scores this category against an answer set.
    ///
    /// Matched points are normalized against the total points of all
    /// clauses, so each category is an independent 0-100 scale.
    pub fn score(&self, answers: &AnswerSet) -> Score {
        let total: u32 = self.rules.iter().map(CategoryRule::points).sum();
        let matched: u32 = self
            .rules
            .iter()
            .filter(|rule| rule.matches(answers))
            .map(CategoryRule::points)
            .sum();
        Score::from_ratio(matched, total)
    }

    /// Validates the category against its questionnaire.
    pub fn validate(&self, definition: &QuestionnaireDefinition) -> Result<(), ConfigurationError> {
        if self.rules.is_empty() {
            return Err(ConfigurationError::EmptyCategoryRules {
                category_id: self.id.to_string(),
            });
        }
        for rule in &self.rules {
            rule.validate(&self.id, definition)?;
        }
        Ok(())
    }
}

/// A scored category entry of the final result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub id: CategoryId,
    pub label: String,
    pub score: Score,
    pub hint: String,
}
