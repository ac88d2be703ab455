//! Questionnaire module - definitions, answers, and the step engine.
//!
//! The session aggregate plus pure transition operations replace the
//! click-handler-driven step logic of the original flows, so the engine is
//! testable without any rendering environment.

mod answers;
mod definition;
mod phase;
mod session;

pub use answers::{AnswerSet, AnswerValue};
pub use definition::{
    OptionDefinition, QuestionDefinition, QuestionnaireDefinition, ScaleDefinition,
    DEFAULT_FREE_FOLLOW_UPS,
};
pub use phase::SessionPhase;
pub use session::{Session, TriageOutcome};
