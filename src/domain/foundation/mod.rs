//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the intake domain.

mod errors;
mod ids;
mod score;
mod timestamp;

pub use errors::{ConfigurationError, ValidationError};
pub use ids::{CategoryId, OptionId, QuestionId, SessionId};
pub use score::Score;
pub use timestamp::Timestamp;
