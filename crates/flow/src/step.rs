//! Core step trait.
//!
//! This module defines the [`Step`] trait, the unit of work a
//! [`Flow`](crate::Flow) executes. The trait is generic over the flow's data
//! type `D` and per-run options `O`.

use async_trait::async_trait;

use crate::{FlowState, StepError};

/// Result of running a step: `Ok(true)` continues, `Ok(false)` aborts.
pub type StepResult = Result<bool, StepError>;

/// A named unit of (possibly suspending) work inside a flow.
#[async_trait]
pub trait Step<D, O = ()>: Send + Sync {
    /// Runs this step against the flow state.
    ///
    /// # Arguments
    ///
    /// * `state` - The run's state container. Steps may mutate `state.data`.
    /// * `options` - Options supplied to [`Flow::begin`](crate::Flow::begin),
    ///   shared by every step of the run.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` to continue with the next step
    /// - `Ok(false)` to abort the run (the step is expected to have told the
    ///   operator why)
    /// - `Err(_)` for contract violations; the run aborts and the error is
    ///   surfaced in the [`FlowReport`](crate::FlowReport)
    async fn run(&self, state: &mut FlowState<D>, options: &O) -> StepResult;
}
