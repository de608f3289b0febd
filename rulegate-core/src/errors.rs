// Error types for the validation core

use crate::messages::MessageBag;
use thiserror::Error;

/// Usage and state errors raised by the orchestrator.
///
/// Rule failures are never errors; they are the normal failed outcome
/// captured in the failure record. These variants cover programmer errors
/// (bad group name, premature access) only.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The requested group has no entry in the rule table.
    #[error("unknown validation group '{0}'")]
    UnknownGroup(String),

    /// Raised by the assert-style entry point when the object did not pass.
    #[error("validation required but not satisfied: {0}")]
    NotSatisfied(MessageBag),

    /// Validated data was accessed before any run or after a failed run.
    #[error("validation state unavailable: {0}")]
    StateUnavailable(&'static str),

    /// The key is absent from the validated data.
    #[error("key '{0}' is not present in the validated data")]
    MissingKey(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Programmer errors raised while interpreting rule specifications.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),

    #[error("rule '{rule}': {detail}")]
    InvalidParameters { rule: String, detail: String },
}
