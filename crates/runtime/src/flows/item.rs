//! Item eligibility checks and post-action item bookkeeping.
//!
//! These steps only look at the subject, never at flow data, so any flow
//! that uses an item can register them. With no item in the subject they
//! pass without doing anything.

use async_trait::async_trait;
use flow_engine::{FlowState, Step, StepResult};
use game_core::{ActorPatch, Item, ItemPatch};
use tracing::{debug, warn};

use crate::repository::DocumentError;
use crate::services::FlowServices;

async fn subject_item<D>(
    services: &FlowServices,
    state: &FlowState<D>,
) -> Result<Option<Item>, DocumentError> {
    match state.item_id() {
        Some(id) => services.documents.item(id).await.map(Some),
        None => Ok(None),
    }
}

/// Stops the flow if the item is destroyed.
pub struct CheckItemDestroyed {
    services: FlowServices,
}

impl CheckItemDestroyed {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl<D: Send + Sync, O: Sync> Step<D, O> for CheckItemDestroyed {
    async fn run(&self, state: &mut FlowState<D>, _options: &O) -> StepResult {
        let Some(item) = subject_item(&self.services, state).await? else {
            return Ok(true);
        };
        if item.is_destroyed() {
            self.services
                .notifier
                .error(&format!("{} is destroyed and cannot be used!", item.name));
            return Ok(false);
        }
        Ok(true)
    }
}

/// Stops the flow if a limited item has no uses left.
pub struct CheckItemLimited {
    services: FlowServices,
}

impl CheckItemLimited {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl<D: Send + Sync, O: Sync> Step<D, O> for CheckItemLimited {
    async fn run(&self, state: &mut FlowState<D>, _options: &O) -> StepResult {
        let Some(item) = subject_item(&self.services, state).await? else {
            return Ok(true);
        };
        if item.is_exhausted() {
            self.services
                .notifier
                .error(&format!("{} has no remaining uses!", item.name));
            return Ok(false);
        }
        Ok(true)
    }
}

/// Stops the flow if a recharge item has not recharged.
pub struct CheckItemCharged {
    services: FlowServices,
}

impl CheckItemCharged {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl<D: Send + Sync, O: Sync> Step<D, O> for CheckItemCharged {
    async fn run(&self, state: &mut FlowState<D>, _options: &O) -> StepResult {
        let Some(item) = subject_item(&self.services, state).await? else {
            return Ok(true);
        };
        if item.is_recharge() && item.charged() == Some(false) {
            self.services
                .notifier
                .error(&format!("{} has not recharged!", item.name));
            return Ok(false);
        }
        Ok(true)
    }
}

/// Adds the item's self heat to the acting actor.
///
/// Heat is not capped; going past the maximum is reported as an overheat.
pub struct ApplySelfHeat {
    services: FlowServices,
}

impl ApplySelfHeat {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl<D: Send + Sync, O: Sync> Step<D, O> for ApplySelfHeat {
    async fn run(&self, state: &mut FlowState<D>, _options: &O) -> StepResult {
        let Some(item) = subject_item(&self.services, state).await? else {
            return Ok(true);
        };
        let Some(heat) = item.self_heat().and_then(|heat| u32::try_from(heat).ok()) else {
            return Ok(true);
        };
        if heat == 0 {
            return Ok(true);
        }

        let actor = self.services.documents.actor(state.actor_id()).await?;
        let Some(meter) = actor.heat() else {
            debug!(target: "runtime::tech", actor = %actor.id, "actor does not track heat");
            return Ok(true);
        };

        let patch = ActorPatch {
            heat: Some(meter.value.saturating_add(heat)),
        };
        let updated = self
            .services
            .documents
            .update_actor(state.actor_id(), patch)
            .await?;

        if let Some(meter) = updated.heat()
            && meter.is_over_capacity()
        {
            warn!(
                target: "runtime::tech",
                actor = %updated.id,
                heat = meter.value,
                max = meter.max,
                "overheating"
            );
            self.services
                .notifier
                .warn(&format!("{} is overheating!", updated.name));
        }
        Ok(true)
    }
}

/// Spends the item's use, charge, or load.
pub struct UpdateItemAfterAction {
    services: FlowServices,
}

impl UpdateItemAfterAction {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }

    fn patch_for(item: &Item) -> ItemPatch {
        let mut patch = ItemPatch::default();
        if item.is_limited()
            && let Some(uses) = item.uses()
        {
            patch.uses = Some(uses.value.saturating_sub(1).max(0));
        }
        if item.is_recharge() && item.charged().is_some() {
            patch.charged = Some(false);
        }
        if item.is_loading() && item.loaded().is_some() {
            patch.loaded = Some(false);
        }
        patch
    }
}

#[async_trait]
impl<D: Send + Sync, O: Sync> Step<D, O> for UpdateItemAfterAction {
    async fn run(&self, state: &mut FlowState<D>, _options: &O) -> StepResult {
        let Some(item) = subject_item(&self.services, state).await? else {
            return Ok(true);
        };
        let patch = Self::patch_for(&item);
        if !patch.is_empty() {
            self.services.documents.update_item(&item.id, patch).await?;
        }
        Ok(true)
    }
}
