//! Event types for different topics.

use serde::{Deserialize, Serialize};

/// Lifecycle boundary of a flow run, relayed from the hook bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEvent {
    /// Kind of the flow, e.g. `TechAttackFlow`.
    pub kind: String,
    /// Stable phase name (`flow.starting`, `step.finished`, ...).
    pub phase: String,
    pub actor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FlowEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase.as_str(), "flow.aborted" | "flow.finished")
    }
}
