//! Session aggregate - one user's in-progress intake flow.
//!
//! The session owns the step cursor and the accumulated answers, and is the
//! only mutable state in the engine. All mutation goes through the
//! operations below; scoring and red-flag detection run exactly once, when
//! `finish()` succeeds.
//!
//! # Invariants
//!
//! - `step_index` stays within `[0, definition.step_count() - 1]`
//! - recorded answers only reference ids present in the definition
//! - the outcome is present iff the phase is `Result`

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ConfigurationError, OptionId, QuestionId, Score, SessionId, Timestamp, ValidationError,
};
use crate::domain::scoring::{RedFlagDetector, RedFlagOutcome, ScoreResult, ScoringEngine};

use super::answers::{AnswerSet, AnswerValue};
use super::definition::{QuestionDefinition, QuestionnaireDefinition};
use super::phase::SessionPhase;

/// Everything computed when a session finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageOutcome {
    pub score: ScoreResult,
    pub red_flag: RedFlagOutcome,
}

/// One user's in-progress questionnaire flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this flow.
    id: SessionId,

    /// The questionnaire being stepped through.
    definition: QuestionnaireDefinition,

    /// Current step (0-based).
    step_index: usize,

    /// Answers accumulated so far.
    answers: AnswerSet,

    /// Lifecycle phase.
    phase: SessionPhase,

    /// When the flow was started.
    created_at: Timestamp,

    /// Present once `finish()` has run.
    outcome: Option<TriageOutcome>,
}

impl Session {
    /// Starts a new intake flow over the given definition.
    ///
    /// The definition is validated eagerly; a malformed table never reaches
    /// the answering or scoring paths.
    pub fn start(definition: QuestionnaireDefinition) -> Result<Self, ConfigurationError> {
        definition.validate()?;
        Ok(Self {
            id: SessionId::new(),
            definition,
            step_index: 0,
            answers: AnswerSet::new(),
            phase: SessionPhase::Collecting,
            created_at: Timestamp::now(),
            outcome: None,
        })
    }

    /// Re-enters the flow after backing out to the intro.
    ///
    /// Answers recorded before backing out are kept.
    pub fn resume(&mut self) -> Result<(), ValidationError> {
        self.phase = self.phase.transition_to(SessionPhase::Collecting)?;
        Ok(())
    }

    // ── Answering ────────────────────────────────────────────────────────

    /// Records the answer for a question.
    ///
    /// The question must be the current step or a previous one
    /// (back-navigation permits re-answering). Single-select non-hybrid
    /// steps auto-advance after recording, mirroring tap-to-proceed;
    /// multi-select and hybrid steps advance via an explicit `next()`.
    ///
    /// An empty multi-select value clears the recorded answer. A
    /// multi-select value mixing the exclusive sentinel with other options
    /// is rejected; use [`Session::toggle_option`] for tap semantics.
    pub fn answer(
        &mut self,
        question_id: &QuestionId,
        value: AnswerValue,
    ) -> Result<(), ValidationError> {
        self.require_collecting()?;
        let index = self.reachable_index(question_id)?;
        let question = &self.definition.questions[index];

        Self::check_value(question, &value)?;

        if let AnswerValue::Multi(ids) = &value {
            if ids.is_empty() {
                self.answers.remove(question_id);
                return Ok(());
            }
        }

        let auto_advance = !question.multi_select && !question.is_hybrid();
        self.answers.set(question_id.clone(), value);

        if auto_advance
            && index == self.step_index
            && self.step_index + 1 < self.definition.step_count()
        {
            self.step_index += 1;
        }

        Ok(())
    }

    /// Toggles one option of a multi-select question.
    ///
    /// Implements the mutual-exclusion rule for the "none of the above"
    /// sentinel: toggling the sentinel on clears every other selection, and
    /// toggling any other option on clears the sentinel.
    pub fn toggle_option(
        &mut self,
        question_id: &QuestionId,
        option_id: &OptionId,
    ) -> Result<(), ValidationError> {
        self.require_collecting()?;
        let index = self.reachable_index(question_id)?;
        let question = &self.definition.questions[index];

        if !question.multi_select {
            let actual = if question.is_hybrid() { "hybrid" } else { "single" };
            return Err(ValidationError::answer_shape_mismatch(
                question_id.as_str(),
                "multi-select",
                actual,
            ));
        }
        let toggled = question
            .option(option_id)
            .ok_or_else(|| {
                ValidationError::unknown_option(question_id.as_str(), option_id.as_str())
            })?
            .clone();

        let mut selected = match self.answers.get(question_id) {
            Some(AnswerValue::Multi(ids)) => ids.clone(),
            _ => Default::default(),
        };

        if selected.contains(option_id) {
            selected.remove(option_id);
        } else if toggled.is_exclusive {
            selected.clear();
            selected.insert(option_id.clone());
        } else {
            if let Some(sentinel) = question.exclusive_option() {
                selected.remove(&sentinel.id);
            }
            selected.insert(option_id.clone());
        }

        if selected.is_empty() {
            self.answers.remove(question_id);
        } else {
            self.answers.set(question_id.clone(), AnswerValue::Multi(selected));
        }
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// True when the current step's completeness rule is satisfied.
    ///
    /// Callers are expected to check this before `next()` or `finish()`;
    /// the engine never throws for a merely incomplete step.
    pub fn can_advance(&self) -> bool {
        self.phase == SessionPhase::Collecting && self.step_complete(self.step_index)
    }

    /// Moves to the next step.
    ///
    /// Rejected while the current step is incomplete. At the final step
    /// this is a bounded no-op; completion goes through `finish()`.
    pub fn next(&mut self) -> Result<(), ValidationError> {
        self.require_collecting()?;
        if !self.can_advance() {
            return Err(ValidationError::StepNotComplete {
                step_index: self.step_index,
            });
        }
        if self.step_index + 1 < self.definition.step_count() {
            self.step_index += 1;
        }
        Ok(())
    }

    /// Moves to the previous step.
    ///
    /// At step 0 this backs out of the flow entirely, returning the session
    /// to the `Idle` phase (the intro screen). `resume()` re-enters.
    pub fn previous(&mut self) -> Result<(), ValidationError> {
        self.require_collecting()?;
        if self.step_index == 0 {
            self.phase = self.phase.transition_to(SessionPhase::Idle)?;
        } else {
            self.step_index -= 1;
        }
        Ok(())
    }

    /// Jumps to a specific step.
    ///
    /// Only steps up to the first unanswered one are reachable, so the
    /// completeness gate cannot be bypassed by jumping ahead.
    pub fn jump(&mut self, step: usize) -> Result<(), ValidationError> {
        self.require_collecting()?;
        let max_reachable = self.furthest_reachable_step();
        if step > max_reachable {
            return Err(ValidationError::StepOutOfBounds {
                requested: step,
                max_reachable,
            });
        }
        self.step_index = step;
        Ok(())
    }

    /// Finishes the flow: scores the answers, detects red flags, and moves
    /// the session to the `Result` phase.
    ///
    /// Scoring is synchronous; the transient `Scoring` phase is never
    /// observable from outside. Rejected while any step is incomplete.
    pub fn finish(&mut self) -> Result<TriageOutcome, ValidationError> {
        self.require_collecting()?;
        if let Some(incomplete) = (0..self.definition.step_count())
            .find(|index| !self.step_complete(*index))
        {
            return Err(ValidationError::StepNotComplete {
                step_index: incomplete,
            });
        }

        self.phase = self.phase.transition_to(SessionPhase::Scoring)?;
        let score = ScoringEngine::score(&self.definition, &self.answers);
        let red_flag = RedFlagDetector::detect(&self.definition, &self.answers);
        self.phase = self.phase.transition_to(SessionPhase::Result)?;

        tracing::debug!(
            session_id = %self.id,
            questionnaire = %self.definition.id,
            overall = score.overall.value(),
            red_flag = red_flag.triggered,
            "intake session finished"
        );

        let outcome = TriageOutcome { score, red_flag };
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Fraction of steps answered so far, as a 0-100 score.
    pub fn progress(&self) -> Score {
        let complete = (0..self.definition.step_count())
            .filter(|index| self.step_complete(*index))
            .count();
        Score::from_ratio(complete as u32, self.definition.step_count() as u32)
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Returns the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the questionnaire definition.
    pub fn definition(&self) -> &QuestionnaireDefinition {
        &self.definition
    }

    /// Returns the current step index.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Returns the question at the current step.
    pub fn current_question(&self) -> Option<&QuestionDefinition> {
        self.definition.question_at(self.step_index)
    }

    /// Returns the accumulated answers.
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns when the flow was started.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the computed outcome once the session has finished.
    pub fn outcome(&self) -> Option<&TriageOutcome> {
        self.outcome.as_ref()
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn require_collecting(&self) -> Result<(), ValidationError> {
        if self.phase != SessionPhase::Collecting {
            return Err(ValidationError::wrong_phase(
                SessionPhase::Collecting.label(),
                self.phase.label(),
            ));
        }
        Ok(())
    }

    fn reachable_index(&self, question_id: &QuestionId) -> Result<usize, ValidationError> {
        let index = self
            .definition
            .index_of(question_id)
            .ok_or_else(|| ValidationError::unknown_question(question_id.as_str()))?;
        if index > self.step_index {
            return Err(ValidationError::StepNotReachable {
                question_id: question_id.to_string(),
            });
        }
        Ok(index)
    }

    fn check_value(
        question: &QuestionDefinition,
        value: &AnswerValue,
    ) -> Result<(), ValidationError> {
        let expected = if question.is_hybrid() {
            "hybrid"
        } else if question.multi_select {
            "multi-select"
        } else {
            "single"
        };
        let shape_ok = match value {
            AnswerValue::Single(_) => expected == "single",
            AnswerValue::Multi(_) => expected == "multi-select",
            AnswerValue::Hybrid { .. } => expected == "hybrid",
        };
        if !shape_ok {
            return Err(ValidationError::answer_shape_mismatch(
                question.id.as_str(),
                expected,
                value.kind(),
            ));
        }

        for option_id in value.selected_options() {
            if question.option(option_id).is_none() {
                return Err(ValidationError::unknown_option(
                    question.id.as_str(),
                    option_id.as_str(),
                ));
            }
        }

        if let AnswerValue::Multi(ids) = value {
            if ids.len() > 1 {
                if let Some(sentinel) = question.exclusive_option() {
                    if ids.contains(&sentinel.id) {
                        return Err(ValidationError::exclusive_conflict(
                            question.id.as_str(),
                            sentinel.id.as_str(),
                        ));
                    }
                }
            }
        }

        if let AnswerValue::Hybrid { scalar, .. } = value {
            // Scale presence is implied by the shape check above.
            if let Some(scale) = &question.scale {
                if *scalar < scale.min || *scalar > scale.max {
                    return Err(ValidationError::ScalarOutOfRange {
                        question_id: question.id.to_string(),
                        min: scale.min,
                        max: scale.max,
                        actual: *scalar,
                    });
                }
            }
        }

        Ok(())
    }

    fn step_complete(&self, index: usize) -> bool {
        let Some(question) = self.definition.question_at(index) else {
            return false;
        };
        match self.answers.get(&question.id) {
            Some(AnswerValue::Single(_)) => !question.multi_select && !question.is_hybrid(),
            Some(AnswerValue::Multi(ids)) => question.multi_select && !ids.is_empty(),
            Some(AnswerValue::Hybrid { .. }) => question.is_hybrid(),
            None => false,
        }
    }

    fn furthest_reachable_step(&self) -> usize {
        let last = self.definition.step_count() - 1;
        (0..self.definition.step_count())
            .find(|index| !self.step_complete(*index))
            .unwrap_or(last)
            .min(last)
    }
}
