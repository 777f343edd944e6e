//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from service assembly, document lookups, and flow
//! construction so clients can bubble them up with consistent context.
use thiserror::Error;

pub use crate::repository::DocumentError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("flow services require a {0} to be configured before building")]
    MissingService(&'static str),

    #[error(transparent)]
    Documents(#[from] DocumentError),

    #[error(transparent)]
    Flow(#[from] flow_engine::FlowError),
}
