//! Error types raised by document stores.

use flow_engine::{DocumentId, StepError};
use thiserror::Error;

/// Errors surfaced by document store implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("actor {0} not found")]
    ActorNotFound(DocumentId),

    #[error("item {0} not found")]
    ItemNotFound(DocumentId),

    #[error("document {id} is not {expected}")]
    WrongKind {
        id: DocumentId,
        expected: &'static str,
    },

    #[error("item {0} has no owner")]
    NoOwner(DocumentId),
}

/// A missing or mistyped document inside a step is a contract violation.
impl From<DocumentError> for StepError {
    fn from(error: DocumentError) -> Self {
        StepError::Other(error.into())
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;
