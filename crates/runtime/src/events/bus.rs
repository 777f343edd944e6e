//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::FlowEvent;
use crate::notify::MessageEntry;
use crate::render::ChatArtifact;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Flow lifecycle boundaries
    Flow,
    /// Rendered chat cards
    Chat,
    /// Operator notifications
    Notification,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Flow(FlowEvent),
    Chat(Box<ChatArtifact>),
    Notification(MessageEntry),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Flow(_) => Topic::Flow,
            Event::Chat(_) => Topic::Chat,
            Event::Notification(_) => Topic::Notification,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning is cheap; clones share channels.
#[derive(Clone)]
pub struct EventBus {
    flow: broadcast::Sender<Event>,
    chat: broadcast::Sender<Event>,
    notification: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            flow: broadcast::channel(capacity).0,
            chat: broadcast::channel(capacity).0,
            notification: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Flow => &self.flow,
            Topic::Chat => &self.chat,
            Topic::Notification => &self.notification,
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Events are best-effort: with no subscribers they are dropped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", "No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MessageLevel;

    fn flow_event(phase: &str) -> Event {
        Event::Flow(FlowEvent {
            kind: "TestFlow".into(),
            phase: phase.into(),
            actor: "a".into(),
            step: None,
            error: None,
        })
    }

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(4);
        let mut receivers = bus.subscribe_multiple(&[Topic::Flow, Topic::Notification]);

        bus.publish(flow_event("flow.starting"));
        bus.publish(Event::Notification(MessageEntry::new("hi", MessageLevel::Info)));

        let flow = receivers.get_mut(&Topic::Flow).expect("flow receiver");
        assert!(matches!(flow.recv().await, Ok(Event::Flow(_))));
        assert!(flow.try_recv().is_err());

        let notes = receivers.get_mut(&Topic::Notification).expect("notification receiver");
        assert!(matches!(notes.recv().await, Ok(Event::Notification(_))));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(flow_event("flow.finished"));
    }
}
