//! Result composer - assembles the final artifact for rendering.
//!
//! The artifact is a plain serializable value: composing it performs no
//! network calls and no persistence. A collaborator may store it or forward
//! it into a chat backend as conversational context.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, Score, SessionId};
use crate::domain::questionnaire::{AnswerValue, QuestionnaireDefinition, Session};
use crate::domain::scoring::{CategoryScore, RedFlagOutcome, ScoreResult};

use super::gate::FollowUpList;

/// Fallback override notice when a definition does not supply its own.
pub const DEFAULT_SAFETY_NOTICE: &str =
    "Your answers include symptoms that need prompt medical attention. \
     Please contact the clinic or emergency services now instead of waiting \
     for your results.";

/// Human-readable restatement of one question's selected answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSummaryEntry {
    pub question_id: QuestionId,
    pub prompt: String,
    pub responses: Vec<String>,
}

/// Override notice shown instead of the normal result screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyNotice {
    pub message: String,

    /// Labels of the answers that triggered the override.
    pub matched_symptoms: Vec<String>,
}

/// The final composed result of one intake flow.
///
/// When `safety_notice` is present the caller's UI contract is to lead with
/// it; scores and categories stay attached for reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultArtifact {
    pub session_id: SessionId,
    pub questionnaire_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_notice: Option<SafetyNotice>,

    pub overall: Score,
    pub categories: Vec<CategoryScore>,
    pub answers: Vec<AnswerSummaryEntry>,
    pub follow_ups: FollowUpList,
}

impl ResultArtifact {
    /// True when the artifact leads with the safety override.
    pub fn is_escalated(&self) -> bool {
        self.safety_notice.is_some()
    }
}

/// Assembles score, red-flag, and disclosure output into one artifact.
pub struct ResultComposer;

impl ResultComposer {
    /// Composes the final artifact for a finished session.
    ///
    /// Pure value construction; any "save this result" action belongs to an
    /// external collaborator.
    pub fn compose(
        session: &Session,
        score: &ScoreResult,
        red_flag: &RedFlagOutcome,
        follow_ups: FollowUpList,
    ) -> ResultArtifact {
        let definition = session.definition();
        let safety_notice = red_flag.triggered.then(|| SafetyNotice {
            message: definition
                .safety_notice
                .clone()
                .unwrap_or_else(|| DEFAULT_SAFETY_NOTICE.to_string()),
            matched_symptoms: red_flag
                .matches
                .iter()
                .map(|m| m.label.clone())
                .collect(),
        });

        ResultArtifact {
            session_id: *session.id(),
            questionnaire_id: definition.id.clone(),
            safety_notice,
            overall: score.overall,
            categories: score.categories.clone(),
            answers: Self::summarize_answers(definition, session),
            follow_ups,
        }
    }

    /// Restates the selected answers as display labels, grouped by question
    /// in step order. Unanswered questions are skipped.
    fn summarize_answers(
        definition: &QuestionnaireDefinition,
        session: &Session,
    ) -> Vec<AnswerSummaryEntry> {
        definition
            .questions
            .iter()
            .filter_map(|question| {
                let value = session.answers().get(&question.id)?;
                let mut responses: Vec<String> = value
                    .selected_options()
                    .into_iter()
                    .filter_map(|id| question.option(id))
                    .map(|option| option.label.clone())
                    .collect();
                if let AnswerValue::Hybrid { scalar, .. } = value {
                    responses.push(match question.scale.as_ref().and_then(|s| s.unit.as_deref()) {
                        Some(unit) => format!("{} {}", scalar, unit),
                        None => scalar.to_string(),
                    });
                }
                Some(AnswerSummaryEntry {
                    question_id: question.id.clone(),
                    prompt: question.prompt.clone(),
                    responses,
                })
            })
            .collect()
    }
}
