//! Error types for the intake domain.

use thiserror::Error;

/// Errors raised when a caller violates the engine's contract.
///
/// These are programmer/UI errors (answering an unknown question, advancing
/// past an incomplete step) and are surfaced immediately rather than
/// swallowed. The scoring and detection paths themselves cannot fail once
/// `finish()` has succeeded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unknown question id '{question_id}'")]
    UnknownQuestion { question_id: String },

    #[error("Question '{question_id}' has no option '{option_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },

    #[error("Question '{question_id}' expects a {expected} answer, got {actual}")]
    AnswerShapeMismatch {
        question_id: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Scalar {actual} for question '{question_id}' is outside {min}..={max}")]
    ScalarOutOfRange {
        question_id: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error(
        "Exclusive option '{option_id}' cannot be combined with other selections in question '{question_id}'"
    )]
    ExclusiveConflict {
        question_id: String,
        option_id: String,
    },

    #[error("Value {actual} for '{field}' must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Question '{question_id}' is ahead of the current step and cannot be answered yet")]
    StepNotReachable { question_id: String },

    #[error("Step {step_index} is not complete")]
    StepNotComplete { step_index: usize },

    #[error("Step {requested} is out of reach (furthest reachable step is {max_reachable})")]
    StepOutOfBounds {
        requested: usize,
        max_reachable: usize,
    },

    #[error("Cannot move from phase '{from}' to phase '{to}'")]
    InvalidPhaseTransition { from: String, to: String },

    #[error("Operation requires phase '{expected}', session is in '{actual}'")]
    WrongPhase { expected: String, actual: String },
}

impl ValidationError {
    /// Creates an unknown question error.
    pub fn unknown_question(question_id: impl Into<String>) -> Self {
        ValidationError::UnknownQuestion {
            question_id: question_id.into(),
        }
    }

    /// Creates an unknown option error.
    pub fn unknown_option(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        ValidationError::UnknownOption {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }

    /// Creates an answer shape mismatch error.
    pub fn answer_shape_mismatch(
        question_id: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        ValidationError::AnswerShapeMismatch {
            question_id: question_id.into(),
            expected,
            actual,
        }
    }

    /// Creates an exclusive conflict error.
    pub fn exclusive_conflict(
        question_id: impl Into<String>,
        option_id: impl Into<String>,
    ) -> Self {
        ValidationError::ExclusiveConflict {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }

    /// Creates an out of range error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates a wrong phase error.
    pub fn wrong_phase(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ValidationError::WrongPhase {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Errors detected eagerly when a questionnaire definition is loaded.
///
/// Definitions are per-tenant declarative tables; every structural problem is
/// rejected at load time so that scoring and detection operate on
/// already-validated data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Questionnaire '{questionnaire_id}' has no questions")]
    EmptyQuestionnaire { questionnaire_id: String },

    #[error("Duplicate question id '{question_id}'")]
    DuplicateQuestionId { question_id: String },

    #[error("Question '{question_id}' has no options")]
    EmptyOptions { question_id: String },

    #[error("Duplicate option id '{option_id}' in question '{question_id}'")]
    DuplicateOptionId {
        question_id: String,
        option_id: String,
    },

    #[error("Question '{question_id}' declares more than one exclusive option")]
    MultipleExclusiveOptions { question_id: String },

    #[error("Question '{question_id}' has an invalid scale (min {min} must be below max {max})")]
    InvalidScale {
        question_id: String,
        min: f64,
        max: f64,
    },

    #[error("Duplicate category id '{category_id}'")]
    DuplicateCategoryId { category_id: String },

    #[error("Category '{category_id}' has no rules")]
    EmptyCategoryRules { category_id: String },

    #[error("Category '{category_id}' references unknown question '{question_id}'")]
    UnknownRuleQuestion {
        category_id: String,
        question_id: String,
    },

    #[error("Category '{category_id}' references unknown option '{option_id}' of question '{question_id}'")]
    UnknownRuleOption {
        category_id: String,
        question_id: String,
        option_id: String,
    },

    #[error("Category '{category_id}' has a scalar rule on non-hybrid question '{question_id}'")]
    ScalarRuleOnDiscreteQuestion {
        category_id: String,
        question_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_question_displays_id() {
        let err = ValidationError::unknown_question("q-headache");
        assert_eq!(format!("{}", err), "Unknown question id 'q-headache'");
    }

    #[test]
    fn unknown_option_displays_both_ids() {
        let err = ValidationError::unknown_option("q-onset", "sudden");
        assert_eq!(
            format!("{}", err),
            "Question 'q-onset' has no option 'sudden'"
        );
    }

    #[test]
    fn shape_mismatch_displays_expected_and_actual() {
        let err = ValidationError::answer_shape_mismatch("q-goals", "multi-select", "single");
        assert_eq!(
            format!("{}", err),
            "Question 'q-goals' expects a multi-select answer, got single"
        );
    }

    #[test]
    fn wrong_phase_displays_both_phases() {
        let err = ValidationError::wrong_phase("collecting", "result");
        assert_eq!(
            format!("{}", err),
            "Operation requires phase 'collecting', session is in 'result'"
        );
    }

    #[test]
    fn configuration_error_displays_context() {
        let err = ConfigurationError::UnknownRuleOption {
            category_id: "sleep".into(),
            question_id: "q-habits".into(),
            option_id: "late-nights".into(),
        };
        assert_eq!(
            format!("{}", err),
            "Category 'sleep' references unknown option 'late-nights' of question 'q-habits'"
        );
    }
}
