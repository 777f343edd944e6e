//! Asynchronous abstractions for operator input.
//!
//! Flows ask the operator for two things: who is being targeted, and whether
//! the accuracy/difficulty bundle is right before rolling. Runtime users plug
//! in implementations backed by a UI, a channel, or test fixtures.
use std::sync::RwLock;

use async_trait::async_trait;
use flow_engine::DocumentId;
use game_core::AccDiffData;

/// Source of the operator's current target selection.
pub trait TargetSource: Send + Sync {
    /// Targets selected right now, in selection order.
    fn current(&self) -> Vec<DocumentId>;
}

/// Target selection held in memory.
#[derive(Debug, Default)]
pub struct StaticTargets {
    selected: RwLock<Vec<DocumentId>>,
}

impl StaticTargets {
    pub fn new(targets: impl IntoIterator<Item = DocumentId>) -> Self {
        Self {
            selected: RwLock::new(targets.into_iter().collect()),
        }
    }

    /// Replaces the selection.
    pub fn select(&self, targets: impl IntoIterator<Item = DocumentId>) {
        let mut selected = self
            .selected
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *selected = targets.into_iter().collect();
    }
}

impl TargetSource for StaticTargets {
    fn current(&self) -> Vec<DocumentId> {
        self.selected
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Interactive confirmation of an accuracy/difficulty bundle.
///
/// Implementations may suspend for as long as the operator needs. Returning
/// `None` cancels the attack.
#[async_trait]
pub trait AccDiffPrompt: Send + Sync {
    async fn confirm(&self, data: &AccDiffData) -> Option<AccDiffData>;
}

/// Accepts every bundle unchanged.
/// Useful for scripted runs or when no operator is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl AccDiffPrompt for AutoConfirm {
    async fn confirm(&self, data: &AccDiffData) -> Option<AccDiffData> {
        Some(data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_can_be_replaced() {
        let targets = StaticTargets::new([DocumentId::new("a")]);
        assert_eq!(targets.current(), vec![DocumentId::new("a")]);

        targets.select([DocumentId::new("b"), DocumentId::new("c")]);
        assert_eq!(targets.current().len(), 2);

        targets.select([]);
        assert!(targets.current().is_empty());
    }

    #[tokio::test]
    async fn auto_confirm_returns_bundle() {
        let data = AccDiffData {
            title: "Hack".into(),
            ..AccDiffData::default()
        };
        assert_eq!(AutoConfirm.confirm(&data).await, Some(data));
    }
}
