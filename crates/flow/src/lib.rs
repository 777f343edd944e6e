//! Ordered-step asynchronous workflow engine.
//!
//! A [`Flow`] threads one exclusively owned [`FlowState`] through the steps of
//! a [`StepRegistry`], strictly one at a time, and stops at the first step that
//! declines to continue or fails.
//!
//! - **Sequential**: steps never overlap within one flow; each observes every
//!   mutation made before it
//! - **One-way abort**: once a run aborts, later steps are skipped and nothing
//!   is rolled back
//! - **Composable**: concrete flows register, replace, and drop named steps
//!   before the run begins
//! - **Observable**: lifecycle phases are published on a [`HookBus`], whose
//!   subscribers may veto a run or a step
//!
//! # Architecture
//!
//! - [`Step`]: core async trait for all steps
//! - [`StepRegistry`]: ordered name → step mapping
//! - [`Flow`]: orchestrator, consumed by [`Flow::begin`]
//! - [`FlowReport`]: what is left after a run resolves
//! - [`HookBus`]: lifecycle publish/subscribe registry

pub mod error;
pub mod flow;
pub mod hooks;
pub mod outcome;
pub mod registry;
pub mod sequence;
pub mod state;
pub mod step;

pub use error::{FlowError, StepError};
pub use flow::{Flow, FlowReport};
pub use hooks::{FlowHook, FlowPhase, HookBus, HookDecision, HookEvent, HookId};
pub use outcome::Outcome;
pub use registry::StepRegistry;
pub use sequence::AppendOnly;
pub use state::{DocumentId, FlowState, Subject};
pub use step::{Step, StepResult};
