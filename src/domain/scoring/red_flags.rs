//! Red-flag detection over completed answers.
//!
//! Runs independently of the scoring engine: a low weighted score and a
//! triggered red flag can coexist. Callers check the outcome before
//! presenting the normal result screen and lead with the safety notice when
//! it triggers.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, QuestionId};
use crate::domain::questionnaire::{AnswerSet, QuestionnaireDefinition};

/// One safety-critical option found in the answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlagMatch {
    pub question_id: QuestionId,
    pub option_id: OptionId,
    pub label: String,
}

/// The result of red-flag detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlagOutcome {
    /// True when any red-flag option appears in the answers.
    pub triggered: bool,

    /// The options that caused it, in definition order.
    pub matches: Vec<RedFlagMatch>,
}

impl RedFlagOutcome {
    /// An outcome with no matches.
    pub fn clear() -> Self {
        Self {
            triggered: false,
            matches: Vec::new(),
        }
    }
}

/// Stateless detector for safety-critical answer combinations.
pub struct RedFlagDetector;

impl RedFlagDetector {
    /// Inspects every selected option of every answered question.
    ///
    /// Detection is per-option, not per-question: a single red-flag
    /// selection among several benign ones in the same multi-select step
    /// still triggers.
    pub fn detect(definition: &QuestionnaireDefinition, answers: &AnswerSet) -> RedFlagOutcome {
        let mut matches = Vec::new();

        for question in &definition.questions {
            let Some(value) = answers.get(&question.id) else {
                continue;
            };
            for option_id in value.selected_options() {
                let Some(option) = question.option(option_id) else {
                    continue;
                };
                if option.is_red_flag {
                    matches.push(RedFlagMatch {
                        question_id: question.id.clone(),
                        option_id: option.id.clone(),
                        label: option.label.clone(),
                    });
                }
            }
        }

        RedFlagOutcome {
            triggered: !matches.is_empty(),
            matches,
        }
    }
}
