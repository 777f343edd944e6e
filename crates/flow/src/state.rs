//! Per-run state container and the weak document references it carries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FlowError, Outcome};

/// Stable identifier of an externally owned document (actor or item).
///
/// Flows never own documents. They keep the identifier and look the document
/// up through whatever store owns it whenever a step needs fresh data.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The acting document and, optionally, the item or ability being used.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Subject {
    actor: DocumentId,
    item: Option<DocumentId>,
}

impl Subject {
    /// A bare actor acting without an item.
    pub fn actor(actor: impl Into<DocumentId>) -> Self {
        Self {
            actor: actor.into(),
            item: None,
        }
    }

    /// An actor using one of its items.
    pub fn item(actor: impl Into<DocumentId>, item: impl Into<DocumentId>) -> Self {
        Self {
            actor: actor.into(),
            item: Some(item.into()),
        }
    }

    pub fn actor_id(&self) -> &DocumentId {
        &self.actor
    }

    pub fn item_id(&self) -> Option<&DocumentId> {
        self.item.as_ref()
    }

    fn validate(&self) -> Result<(), FlowError> {
        if self.actor.is_empty() {
            return Err(FlowError::InvalidSubject("actor"));
        }
        if self.item.as_ref().is_some_and(DocumentId::is_empty) {
            return Err(FlowError::InvalidSubject("item"));
        }
        Ok(())
    }
}

/// Mutable record threaded through every step of one run.
///
/// `data` belongs to the concrete flow and is freely mutated by its steps.
/// Engine bookkeeping (`kind`, `outcome`, `current_step`) is private: only the
/// orchestrator moves it forward.
#[derive(Debug)]
pub struct FlowState<D> {
    kind: &'static str,
    subject: Subject,
    pub data: D,
    outcome: Outcome,
    current_step: Option<String>,
}

impl<D> FlowState<D> {
    /// Builds the state for a new run.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidSubject`] when the actor (or a supplied
    /// item) reference is empty.
    pub fn new(kind: &'static str, subject: Subject, data: D) -> Result<Self, FlowError> {
        subject.validate()?;
        Ok(Self {
            kind,
            subject,
            data,
            outcome: Outcome::Pending,
            current_step: None,
        })
    }

    /// Discriminator of the flow variant that produced this state.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn actor_id(&self) -> &DocumentId {
        self.subject.actor_id()
    }

    pub fn item_id(&self) -> Option<&DocumentId> {
        self.subject.item_id()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Last step the orchestrator entered.
    pub fn current_step(&self) -> Option<&str> {
        self.current_step.as_deref()
    }

    pub(crate) fn enter_step(&mut self, name: &str) {
        self.current_step = Some(name.to_owned());
    }

    /// Settles a pending outcome. Returns `false` if it was already settled.
    pub(crate) fn settle(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_settled() || outcome.is_pending() {
            return false;
        }
        self.outcome = outcome;
        true
    }
}
