//! Public surface shared with clients.
//!
//! Re-exports the error types and the operator-facing provider traits so
//! consumers can depend on a single module.
mod errors;
mod prompt;
mod providers;

pub use errors::{DocumentError, Result, RuntimeError};
pub use prompt::{PromptChannel, PromptRequest};
pub use providers::{AccDiffPrompt, AutoConfirm, StaticTargets, TargetSource};
