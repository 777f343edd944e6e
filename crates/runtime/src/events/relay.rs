//! Bridge from the flow hook bus onto the event bus.

use flow_engine::{FlowHook, FlowPhase, HookDecision, HookEvent};

use super::bus::{Event, EventBus};
use super::types::FlowEvent;

/// Hook that republishes every lifecycle phase on [`Topic::Flow`](super::Topic::Flow).
///
/// Never vetoes.
pub struct EventRelay {
    events: EventBus,
}

impl EventRelay {
    pub fn new(events: EventBus) -> Self {
        Self { events }
    }
}

impl FlowHook for EventRelay {
    fn name(&self) -> &'static str {
        "event-relay"
    }

    fn on_event(&self, event: &HookEvent<'_>) -> HookDecision {
        let (step, error) = match event.phase {
            FlowPhase::StepStarting { step } | FlowPhase::StepFinished { step } => {
                (Some(step.to_string()), None)
            }
            FlowPhase::FlowAborted { step, error } => {
                (step.map(str::to_string), error.map(str::to_string))
            }
            FlowPhase::FlowStarting | FlowPhase::FlowFinished => (None, None),
        };

        self.events.publish(Event::Flow(FlowEvent {
            kind: event.kind.to_string(),
            phase: event.phase.event_name().to_string(),
            actor: event.actor().to_string(),
            step,
            error,
        }));
        HookDecision::Continue
    }
}
