//! In-progress answer storage for one intake session.
//!
//! Pure data: the store records what the caller supplies and exposes
//! get/set/merge. Validation against the definition happens in the session
//! operations, not here.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::foundation::{OptionId, QuestionId};

/// The recorded answer for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Exactly one option (single-select steps).
    Single(OptionId),

    /// Any subset of options (multi-select steps).
    Multi(BTreeSet<OptionId>),

    /// A choice plus a continuous input (hybrid/slider steps).
    Hybrid { option: OptionId, scalar: f64 },
}

impl AnswerValue {
    /// Convenience constructor for a single selection.
    pub fn single(option: impl Into<OptionId>) -> Self {
        Self::Single(option.into())
    }

    /// Convenience constructor for a multi-selection.
    pub fn multi<I, T>(options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OptionId>,
    {
        Self::Multi(options.into_iter().map(Into::into).collect())
    }

    /// Convenience constructor for a hybrid answer.
    pub fn hybrid(option: impl Into<OptionId>, scalar: f64) -> Self {
        Self::Hybrid {
            option: option.into(),
            scalar,
        }
    }

    /// Short name of the answer shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Multi(_) => "multi-select",
            Self::Hybrid { .. } => "hybrid",
        }
    }

    /// All option ids selected by this answer.
    pub fn selected_options(&self) -> Vec<&OptionId> {
        match self {
            Self::Single(id) => vec![id],
            Self::Multi(ids) => ids.iter().collect(),
            Self::Hybrid { option, .. } => vec![option],
        }
    }

    /// The scalar component, present on hybrid answers only.
    pub fn scalar(&self) -> Option<f64> {
        match self {
            Self::Hybrid { scalar, .. } => Some(*scalar),
            _ => None,
        }
    }

    /// True when a given option is part of this answer.
    pub fn has_option(&self, id: &OptionId) -> bool {
        match self {
            Self::Single(selected) => selected == id,
            Self::Multi(ids) => ids.contains(id),
            Self::Hybrid { option, .. } => option == id,
        }
    }
}

/// Mapping from question id to the recorded answer.
///
/// A question absent from the map is unanswered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, AnswerValue>,
}

impl AnswerSet {
    /// Creates an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the answer for a question, if recorded.
    pub fn get(&self, question_id: &QuestionId) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Records or replaces the answer for a question.
    pub fn set(&mut self, question_id: QuestionId, value: AnswerValue) {
        self.answers.insert(question_id, value);
    }

    /// Removes the answer for a question, returning it when present.
    pub fn remove(&mut self, question_id: &QuestionId) -> Option<AnswerValue> {
        self.answers.remove(question_id)
    }

    /// Merges another answer set into this one; the other set wins on
    /// conflicting question ids.
    pub fn merge(&mut self, other: AnswerSet) {
        self.answers.extend(other.answers);
    }

    /// True when a question has a recorded answer.
    pub fn is_answered(&self, question_id: &QuestionId) -> bool {
        self.answers.contains_key(question_id)
    }

    /// Number of answered questions.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// True when nothing has been answered.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterates over recorded answers in question-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.answers.iter()
    }
}
