//! The orchestrator.
//!
//! # Run semantics
//!
//! [`Flow::begin`] consumes the flow, so a resolved instance can never be run
//! again. The step order is frozen when the run starts. Steps only receive the
//! state container, never the registry, so a step cannot change the order of
//! the run it belongs to.
//!
//! ```text
//! FlowStarting ──veto──────────────────────────────► FlowAborted
//!   │
//!   ├─► StepStarting(n) ──veto──────────────────────► FlowAborted
//!   │      │
//!   │      ├─ Ok(true)  ─► StepFinished(n) ─► next
//!   │      ├─ Ok(false) ────────────────────────────► FlowAborted
//!   │      └─ Err(e)    ────────────────────────────► FlowAborted (+ fault)
//!   │
//!   └─► FlowFinished
//! ```

use tracing::{debug, error, info, warn};

use crate::{
    FlowError, FlowPhase, FlowState, HookBus, HookDecision, HookEvent, Outcome, StepRegistry,
};

/// One orchestrated run of an ordered step sequence against a state container.
pub struct Flow<D, O = ()> {
    state: FlowState<D>,
    steps: StepRegistry<D, O>,
    hooks: HookBus,
}

impl<D, O> Flow<D, O>
where
    D: Send + 'static,
    O: Sync,
{
    /// Creates a flow with an empty registry.
    ///
    /// Concrete flows populate [`steps_mut`](Self::steps_mut) immediately
    /// after construction, in their declared order.
    pub fn new(state: FlowState<D>, hooks: HookBus) -> Self {
        Self {
            state,
            steps: StepRegistry::new(),
            hooks,
        }
    }

    pub fn kind(&self) -> &'static str {
        self.state.kind()
    }

    pub fn state(&self) -> &FlowState<D> {
        &self.state
    }

    pub fn steps(&self) -> &StepRegistry<D, O> {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut StepRegistry<D, O> {
        &mut self.steps
    }

    /// Runs every registered step in order until one declines or fails.
    ///
    /// Only one step executes at a time; the next step is not started before
    /// the current one's future resolves.
    pub async fn begin(mut self, options: &O) -> FlowReport<D> {
        let kind = self.kind();

        if let HookDecision::Veto(reason) = self.publish(FlowPhase::FlowStarting) {
            warn!(target: "flow::engine", flow = kind, reason = %reason, "flow vetoed before start");
            return self.abort(None);
        }

        let steps = self.steps.snapshot();
        debug!(target: "flow::engine", flow = kind, steps = steps.len(), "flow starting");

        for (name, step) in steps.iter() {
            self.state.enter_step(name);

            if let HookDecision::Veto(reason) =
                self.publish(FlowPhase::StepStarting { step: name })
            {
                warn!(target: "flow::engine", flow = kind, step = %name, reason = %reason, "step vetoed");
                return self.abort(None);
            }

            debug!(target: "flow::engine", flow = kind, step = %name, "step starting");
            match step.run(&mut self.state, options).await {
                Ok(true) => {
                    self.publish(FlowPhase::StepFinished { step: name });
                }
                Ok(false) => {
                    warn!(target: "flow::engine", flow = kind, step = %name, "step aborted flow");
                    return self.abort(None);
                }
                Err(source) => {
                    error!(target: "flow::engine", flow = kind, step = %name, error = %source, "step failed");
                    return self.abort(Some(FlowError::Step {
                        step: name.clone(),
                        source,
                    }));
                }
            }
        }

        self.state.settle(Outcome::Ok);
        self.publish(FlowPhase::FlowFinished);
        info!(target: "flow::engine", flow = kind, actor = %self.state.actor_id(), "flow finished");

        FlowReport {
            state: self.state,
            fault: None,
        }
    }

    fn abort(mut self, fault: Option<FlowError>) -> FlowReport<D> {
        self.state.settle(Outcome::Aborted);

        let error = fault.as_ref().map(|fault| match fault {
            FlowError::Step { source, .. } => source.to_string(),
            other => other.to_string(),
        });
        self.publish(FlowPhase::FlowAborted {
            step: self.state.current_step(),
            error: error.as_deref(),
        });

        FlowReport {
            state: self.state,
            fault,
        }
    }

    fn publish(&self, phase: FlowPhase<'_>) -> HookDecision {
        self.hooks.publish(&HookEvent::new(phase, &self.state))
    }
}

/// What remains of a flow after [`Flow::begin`] resolves.
#[derive(Debug)]
pub struct FlowReport<D> {
    state: FlowState<D>,
    fault: Option<FlowError>,
}

impl<D> FlowReport<D> {
    /// `true` if every step ran and returned `true`.
    pub fn success(&self) -> bool {
        self.state.outcome().is_ok()
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    /// Step that stopped the run, if it aborted inside a step.
    pub fn aborted_at(&self) -> Option<&str> {
        if self.state.outcome().is_aborted() {
            self.state.current_step()
        } else {
            None
        }
    }

    /// Contract violation raised by a step, if that is what stopped the run.
    pub fn fault(&self) -> Option<&FlowError> {
        self.fault.as_ref()
    }

    pub fn state(&self) -> &FlowState<D> {
        &self.state
    }

    pub fn into_state(self) -> FlowState<D> {
        self.state
    }

    /// Collapses the report: faults become `Err`, everything else the
    /// success flag.
    pub fn into_result(self) -> Result<bool, FlowError> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(self.state.outcome().is_ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{FlowHook, Step, StepError, StepResult, Subject};

    #[derive(Default)]
    struct Data {
        trail: Vec<&'static str>,
    }

    struct Mark {
        label: &'static str,
        calls: Arc<AtomicUsize>,
        proceed: bool,
    }

    impl Mark {
        fn new(label: &'static str, proceed: bool) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    label,
                    calls: calls.clone(),
                    proceed,
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl Step<Data> for Mark {
        async fn run(&self, state: &mut FlowState<Data>, _options: &()) -> StepResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            state.data.trail.push(self.label);
            tokio::task::yield_now().await;
            Ok(self.proceed)
        }
    }

    struct Broken;

    #[async_trait]
    impl Step<Data> for Broken {
        async fn run(&self, _state: &mut FlowState<Data>, _options: &()) -> StepResult {
            Err(StepError::MissingState("accuracy bundle"))
        }
    }

    struct Phases(Mutex<Vec<String>>);

    impl FlowHook for Phases {
        fn name(&self) -> &'static str {
            "phases"
        }

        fn on_event(&self, event: &HookEvent<'_>) -> HookDecision {
            let label = match event.phase {
                FlowPhase::StepStarting { step } | FlowPhase::StepFinished { step } => {
                    format!("{}:{step}", event.phase.event_name())
                }
                other => other.event_name().to_string(),
            };
            self.0.lock().unwrap().push(label);
            HookDecision::Continue
        }
    }

    struct VetoStep(&'static str);

    impl FlowHook for VetoStep {
        fn name(&self) -> &'static str {
            "veto-step"
        }

        fn on_event(&self, event: &HookEvent<'_>) -> HookDecision {
            match event.phase {
                FlowPhase::StepStarting { step } if step == self.0 => {
                    HookDecision::Veto(format!("{step} disabled"))
                }
                _ => HookDecision::Continue,
            }
        }
    }

    fn flow(hooks: HookBus) -> Flow<Data> {
        let state = FlowState::new("test", Subject::actor("mech"), Data::default()).unwrap();
        Flow::new(state, hooks)
    }

    #[tokio::test]
    async fn runs_every_step_in_order() {
        let mut flow = flow(HookBus::new());
        flow.steps_mut().set("a", Mark::new("a", true).0);
        flow.steps_mut().set("b", Mark::new("b", true).0);
        flow.steps_mut().set("c", Mark::new("c", true).0);

        let report = flow.begin(&()).await;

        assert!(report.success());
        assert_eq!(report.state().data.trail, ["a", "b", "c"]);
        assert_eq!(report.state().current_step(), Some("c"));
        assert_eq!(report.aborted_at(), None);
    }

    #[tokio::test]
    async fn false_stops_pipeline() {
        let (a, a_calls) = Mark::new("a", true);
        let (b, b_calls) = Mark::new("b", false);
        let (c, c_calls) = Mark::new("c", true);

        let mut flow = flow(HookBus::new());
        flow.steps_mut().set("a", a);
        flow.steps_mut().set("b", b);
        flow.steps_mut().set("c", c);

        let report = flow.begin(&()).await;

        assert_eq!(report.outcome(), Outcome::Aborted);
        assert_eq!(report.aborted_at(), Some("b"));
        assert!(report.fault().is_none());
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 1);
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn step_error_is_converted_into_aborted_run() {
        let (after, after_calls) = Mark::new("after", true);
        let mut flow = flow(HookBus::new());
        flow.steps_mut().set("broken", Broken);
        flow.steps_mut().set("after", after);

        let report = flow.begin(&()).await;

        assert!(report.outcome().is_aborted());
        assert_eq!(report.fault().and_then(FlowError::step), Some("broken"));
        assert_eq!(after_calls.load(Ordering::SeqCst), 0);
        assert!(matches!(
            report.into_result(),
            Err(FlowError::Step {
                source: StepError::MissingState(_),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn publishes_lifecycle_phases() {
        let hooks = HookBus::new();
        let phases = Arc::new(Phases(Mutex::new(Vec::new())));
        hooks.subscribe(phases.clone());

        let mut flow = flow(hooks);
        flow.steps_mut().set("a", Mark::new("a", true).0);
        flow.steps_mut().set("b", Mark::new("b", false).0);
        flow.begin(&()).await;

        assert_eq!(
            *phases.0.lock().unwrap(),
            [
                "flow.starting",
                "step.starting:a",
                "step.finished:a",
                "step.starting:b",
                "flow.aborted",
            ]
        );
    }

    #[tokio::test]
    async fn step_veto_aborts_before_step_runs() {
        let hooks = HookBus::new();
        hooks.subscribe(Arc::new(VetoStep("b")));

        let (b, b_calls) = Mark::new("b", true);
        let mut flow = flow(hooks);
        flow.steps_mut().set("a", Mark::new("a", true).0);
        flow.steps_mut().set("b", b);

        let report = flow.begin(&()).await;

        assert_eq!(report.aborted_at(), Some("b"));
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
        assert_eq!(report.state().data.trail, ["a"]);
    }

    #[tokio::test]
    async fn empty_registry_succeeds() {
        let report = flow(HookBus::new()).begin(&()).await;
        assert!(report.success());
        assert_eq!(report.state().current_step(), None);
    }

    #[tokio::test]
    async fn replaced_step_runs_in_original_slot() {
        let mut flow = flow(HookBus::new());
        flow.steps_mut().set("a", Mark::new("a", true).0);
        flow.steps_mut().set("b", Mark::new("b", true).0);
        flow.steps_mut().set("c", Mark::new("c", true).0);
        flow.steps_mut().set("b", Mark::new("b2", true).0);
        flow.steps_mut().set("d", Mark::new("d", true).0);

        let report = flow.begin(&()).await;
        assert_eq!(report.state().data.trail, ["a", "b2", "c", "d"]);
    }
}
