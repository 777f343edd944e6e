//! Lifecycle hook bus.
//!
//! The bus lets code outside a flow (rule modules, relays, diagnostics)
//! observe runs without the flow knowing about them. The orchestrator
//! publishes a [`HookEvent`] at each lifecycle boundary; subscribers answer
//! with a [`HookDecision`].
//!
//! # Veto convention
//!
//! Only [`FlowPhase::FlowStarting`] and [`FlowPhase::StepStarting`] can be
//! vetoed. A veto on any other phase is logged and ignored. Every subscriber
//! is notified even after one vetoes; the first veto wins.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, trace};

use crate::{DocumentId, FlowState, Subject};

/// Lifecycle boundary being published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase<'a> {
    FlowStarting,
    StepStarting { step: &'a str },
    StepFinished { step: &'a str },
    FlowAborted {
        step: Option<&'a str>,
        error: Option<&'a str>,
    },
    FlowFinished,
}

impl FlowPhase<'_> {
    /// Stable event name, e.g. for relaying onto other buses.
    pub const fn event_name(&self) -> &'static str {
        match self {
            FlowPhase::FlowStarting => "flow.starting",
            FlowPhase::StepStarting { .. } => "step.starting",
            FlowPhase::StepFinished { .. } => "step.finished",
            FlowPhase::FlowAborted { .. } => "flow.aborted",
            FlowPhase::FlowFinished => "flow.finished",
        }
    }

    pub const fn is_vetoable(&self) -> bool {
        matches!(self, FlowPhase::FlowStarting | FlowPhase::StepStarting { .. })
    }
}

/// Payload handed to every subscriber.
pub struct HookEvent<'a> {
    /// Kind of the flow publishing the event.
    pub kind: &'static str,
    pub phase: FlowPhase<'a>,
    subject: &'a Subject,
    state: &'a dyn Any,
}

impl<'a> HookEvent<'a> {
    pub fn new<D: 'static>(phase: FlowPhase<'a>, state: &'a FlowState<D>) -> Self {
        Self {
            kind: state.kind(),
            phase,
            subject: state.subject(),
            state,
        }
    }

    pub fn subject(&self) -> &'a Subject {
        self.subject
    }

    pub fn actor(&self) -> &'a DocumentId {
        self.subject.actor_id()
    }

    /// Typed view of the publishing flow's state.
    ///
    /// Returns `None` if the flow carries a different data type.
    pub fn state<D: 'static>(&self) -> Option<&'a FlowState<D>> {
        self.state.downcast_ref()
    }
}

/// Subscriber answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookDecision {
    Continue,
    Veto(String),
}

impl HookDecision {
    pub fn is_veto(&self) -> bool {
        matches!(self, HookDecision::Veto(_))
    }
}

/// Subscriber to flow lifecycle events.
pub trait FlowHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    fn on_event(&self, event: &HookEvent<'_>) -> HookDecision;
}

/// Handle returned by [`HookBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type Subscribers = Vec<(HookId, Arc<dyn FlowHook>)>;

/// Process-wide publish/subscribe registry for flow lifecycle events.
///
/// Cloning is cheap and every clone shares the same subscribers. Build one at
/// startup, hand it to the flows you construct, and [`clear`](Self::clear) it
/// at shutdown.
#[derive(Clone, Default)]
pub struct HookBus {
    subscribers: Arc<RwLock<Subscribers>>,
    next_id: Arc<AtomicU64>,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, hook: Arc<dyn FlowHook>) -> HookId {
        let id = HookId(self.next_id.fetch_add(1, Ordering::Relaxed));
        debug!(target: "flow::hooks", hook = hook.name(), "hook subscribed");
        self.write().push((id, hook));
        id
    }

    /// Removes a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: HookId) -> bool {
        let mut subscribers = self.write();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    /// Drops every subscriber.
    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Notifies every subscriber and returns the first veto, if the phase
    /// can be vetoed.
    pub fn publish(&self, event: &HookEvent<'_>) -> HookDecision {
        // Subscribers may (un)subscribe from inside `on_event`.
        let subscribers: Subscribers = self.read().clone();
        if subscribers.is_empty() {
            trace!(target: "flow::hooks", event = event.phase.event_name(), "no subscribers");
            return HookDecision::Continue;
        }

        let mut decision = HookDecision::Continue;
        for (_, hook) in &subscribers {
            let HookDecision::Veto(reason) = hook.on_event(event) else {
                continue;
            };
            if !event.phase.is_vetoable() {
                debug!(
                    target: "flow::hooks",
                    hook = hook.name(),
                    event = event.phase.event_name(),
                    reason = %reason,
                    "veto ignored for non-vetoable phase"
                );
                continue;
            }
            if !decision.is_veto() {
                debug!(
                    target: "flow::hooks",
                    hook = hook.name(),
                    event = event.phase.event_name(),
                    reason = %reason,
                    "hook vetoed"
                );
                decision = HookDecision::Veto(reason);
            }
        }
        decision
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Subscribers> {
        self.subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Subscribers> {
        self.subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::Subject;

    struct Recorder(Mutex<Vec<&'static str>>);

    impl FlowHook for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn on_event(&self, event: &HookEvent<'_>) -> HookDecision {
            self.0.lock().unwrap().push(event.phase.event_name());
            HookDecision::Continue
        }
    }

    struct VetoAll;

    impl FlowHook for VetoAll {
        fn name(&self) -> &'static str {
            "veto-all"
        }

        fn on_event(&self, _event: &HookEvent<'_>) -> HookDecision {
            HookDecision::Veto("no".into())
        }
    }

    fn state() -> FlowState<u32> {
        FlowState::new("test", Subject::actor("mech"), 7).unwrap()
    }

    #[test]
    fn publish_without_subscribers_continues() {
        let bus = HookBus::new();
        let state = state();
        let event = HookEvent::new(FlowPhase::FlowStarting, &state);
        assert_eq!(bus.publish(&event), HookDecision::Continue);
    }

    #[test]
    fn veto_still_notifies_every_subscriber() {
        let bus = HookBus::new();
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        bus.subscribe(Arc::new(VetoAll));
        bus.subscribe(recorder.clone());

        let state = state();
        let event = HookEvent::new(FlowPhase::FlowStarting, &state);
        assert!(bus.publish(&event).is_veto());
        assert_eq!(*recorder.0.lock().unwrap(), ["flow.starting"]);
    }

    #[test]
    fn veto_on_finished_phase_is_ignored() {
        let bus = HookBus::new();
        bus.subscribe(Arc::new(VetoAll));

        let state = state();
        let event = HookEvent::new(FlowPhase::FlowFinished, &state);
        assert_eq!(bus.publish(&event), HookDecision::Continue);
    }

    #[test]
    fn unsubscribe_and_clear() {
        let bus = HookBus::new();
        let id = bus.subscribe(Arc::new(VetoAll));
        bus.subscribe(Arc::new(VetoAll));
        assert_eq!(bus.len(), 2);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.len(), 1);

        bus.clear();
        assert!(bus.is_empty());
    }

    #[test]
    fn typed_state_view() {
        let state = state();
        let event = HookEvent::new(FlowPhase::FlowStarting, &state);

        assert_eq!(event.state::<u32>().map(|s| s.data), Some(7));
        assert!(event.state::<String>().is_none());
        assert_eq!(event.kind, "test");
    }
}
