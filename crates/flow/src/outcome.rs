//! Terminal status of a flow run.

use serde::Serialize;

/// Tri-state success flag carried by every [`FlowState`](crate::FlowState).
///
/// A run starts `Pending` and settles exactly once, into either `Ok` or
/// `Aborted`. Settled outcomes never change again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The engine has not finished the run.
    #[default]
    Pending,

    /// Every step returned `true`.
    Ok,

    /// A step returned `false`, failed, or was vetoed.
    Aborted,
}

impl Outcome {
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, Outcome::Pending)
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        matches!(self, Outcome::Ok)
    }

    #[inline]
    pub fn is_aborted(self) -> bool {
        matches!(self, Outcome::Aborted)
    }

    /// Returns `true` once the outcome can no longer change.
    #[inline]
    pub fn is_settled(self) -> bool {
        !self.is_pending()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Pending => "pending",
            Outcome::Ok => "ok",
            Outcome::Aborted => "aborted",
        }
    }
}
