//! Operator notifications.
//!
//! Steps report validation and resource failures through a [`Notifier`]
//! rather than through errors: the run simply stops and the operator is told
//! why.
use std::collections::VecDeque;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::events::{Event, EventBus};

/// Severity level for operator messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub text: String,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

/// Circular buffer of messages shown to the operator.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Notification channel towards the operator.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: MessageLevel, message: &str);

    fn info(&self, message: &str) {
        self.notify(MessageLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(MessageLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(MessageLevel::Error, message);
    }
}

/// Keeps recent notifications and republishes them on the event bus.
pub struct LogNotifier {
    log: Mutex<MessageLog>,
    events: EventBus,
}

impl LogNotifier {
    pub fn new(capacity: usize, events: EventBus) -> Self {
        Self {
            log: Mutex::new(MessageLog::new(capacity)),
            events,
        }
    }

    /// Copy of the retained messages, oldest first.
    pub fn entries(&self) -> Vec<MessageEntry> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn count(&self, level: MessageLevel) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, level: MessageLevel, message: &str) {
        match level {
            MessageLevel::Info => info!(target: "runtime::notify", "{message}"),
            MessageLevel::Warning => warn!(target: "runtime::notify", "{message}"),
            MessageLevel::Error => error!(target: "runtime::notify", "{message}"),
        }

        let entry = MessageEntry::new(message, level);
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry.clone());
        self.events.publish(Event::Notification(entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;

    #[test]
    fn log_drops_oldest_when_full() {
        let mut log = MessageLog::new(2);
        log.push(MessageEntry::new("a", MessageLevel::Info));
        log.push(MessageEntry::new("b", MessageLevel::Info));
        log.push(MessageEntry::new("c", MessageLevel::Info));

        let texts: Vec<_> = log.iter().map(|entry| entry.text.as_str()).collect();
        assert_eq!(texts, ["b", "c"]);
        assert_eq!(log.recent(1).next().map(|e| e.text.as_str()), Some("c"));
    }

    #[test]
    fn zero_capacity_is_bounded_to_one() {
        let mut log = MessageLog::new(0);
        log.push(MessageEntry::new("a", MessageLevel::Info));
        log.push(MessageEntry::new("b", MessageLevel::Info));
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn notifier_records_and_publishes() {
        let events = EventBus::new();
        let mut rx = events.subscribe(Topic::Notification);
        let notifier = LogNotifier::new(8, events);

        notifier.error("Scanner is destroyed!");
        notifier.info("rolled");

        assert_eq!(notifier.count(MessageLevel::Error), 1);
        assert_eq!(notifier.entries().len(), 2);
        match rx.recv().await {
            Ok(Event::Notification(entry)) => assert_eq!(entry.text, "Scanner is destroyed!"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
