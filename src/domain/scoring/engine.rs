//! Scoring engine - weighted overall score plus category sub-scores.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Score;
use crate::domain::questionnaire::{AnswerSet, QuestionnaireDefinition};

use super::categories::CategoryScore;

/// The scored outcome of a completed answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Overall weighted score, 0-100.
    pub overall: Score,

    /// Category sub-scores, sorted descending so the top risks lead.
    pub categories: Vec<CategoryScore>,
}

impl ScoreResult {
    /// Returns the highest-scoring categories, in order.
    pub fn top_categories(&self, count: usize) -> &[CategoryScore] {
        &self.categories[..count.min(self.categories.len())]
    }
}

/// Stateless calculator mapping completed answers to a [`ScoreResult`].
///
/// Deterministic: a fixed `(definition, answers)` pair always yields the
/// same result.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Scores an answer set against a definition.
    ///
    /// The overall score accumulates the selected option weights of every
    /// weighted question (summing over multi-selections) against the
    /// maximum achievable weight, then normalizes to 0-100. Category
    /// sub-scores come from each category's own rules and are deliberately
    /// independent of the weight table.
    ///
    /// # Edge Cases
    /// - No weighted questions: overall is 0 (no division by zero)
    /// - Category ties: stable sort keeps definition order
    pub fn score(definition: &QuestionnaireDefinition, answers: &AnswerSet) -> ScoreResult {
        let mut total: u32 = 0;
        let mut max_possible: u32 = 0;

        for question in &definition.questions {
            if !question.is_weighted() {
                continue;
            }
            max_possible += question.max_achievable_weight();
            if let Some(value) = answers.get(&question.id) {
                total += value
                    .selected_options()
                    .into_iter()
                    .filter_map(|id| question.option(id))
                    .filter_map(|option| option.weight)
                    .sum::<u32>();
            }
        }

        let mut categories: Vec<CategoryScore> = definition
            .categories
            .iter()
            .map(|category| CategoryScore {
                id: category.id.clone(),
                label: category.label.clone(),
                score: category.score(answers),
                hint: category.hint.clone(),
            })
            .collect();
        // sort_by is stable; ties keep definition order.
        categories.sort_by(|a, b| b.score.cmp(&a.score));

        ScoreResult {
            overall: Score::from_ratio(total, max_possible),
            categories,
        }
    }
}
