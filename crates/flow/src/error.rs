//! Error types raised by steps and surfaced by the orchestrator.
//!
//! Expected, user-facing conditions (invalid source, exhausted item, operator
//! cancellation) are not errors: steps report them and return `Ok(false)`.
//! [`StepError`] is reserved for contract violations and collaborator faults.
use thiserror::Error;

/// Fault raised by a step.
#[derive(Debug, Error)]
pub enum StepError {
    /// The step expected state that an earlier step should have produced.
    #[error("flow state missing: {0}")]
    MissingState(&'static str),

    #[error("contract violation: {0}")]
    Contract(String),

    /// A collaborator (document store, dice, prompt) failed underneath the step.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced by [`Flow`](crate::Flow) construction and runs.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("flow subject requires a non-empty {0} id")]
    InvalidSubject(&'static str),

    #[error("step `{step}` failed")]
    Step {
        step: String,
        #[source]
        source: StepError,
    },
}

impl FlowError {
    /// Name of the step that raised this error, if any.
    pub fn step(&self) -> Option<&str> {
        match self {
            FlowError::Step { step, .. } => Some(step),
            FlowError::InvalidSubject(_) => None,
        }
    }
}
