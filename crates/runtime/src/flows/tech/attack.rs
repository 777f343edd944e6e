//! Attack staging and roll resolution.

use async_trait::async_trait;
use flow_engine::{FlowState, Step, StepError, StepResult};
use game_core::{AccDiffData, AccDiffTarget, ItemSystem, NpcFeatureKind, RollFormula, StatusKind};
use tracing::{debug, warn};

use super::{HitResult, TargetedRoll, TechAttackData, TechAttackOptions};
use crate::repository::DocumentError;
use crate::services::FlowServices;

fn acc_diff(state: &FlowState<TechAttackData>) -> Result<&AccDiffData, StepError> {
    state
        .data
        .acc_diff
        .as_ref()
        .ok_or(StepError::MissingState("acc_diff"))
}

/// Copies the item's tags onto the attack unless initialization already did.
pub struct SetAttackTags {
    services: FlowServices,
}

impl SetAttackTags {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Step<TechAttackData, TechAttackOptions> for SetAttackTags {
    async fn run(
        &self,
        state: &mut FlowState<TechAttackData>,
        _options: &TechAttackOptions,
    ) -> StepResult {
        if !state.data.tags.is_empty() {
            return Ok(true);
        }
        if let Some(id) = state.item_id() {
            let item = self.services.documents.item(id).await?;
            state.data.tags = item.tags().to_vec();
        }
        Ok(true)
    }
}

/// Fills the effect text from the item when nothing more specific was set.
pub struct SetAttackEffects {
    services: FlowServices,
}

impl SetAttackEffects {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Step<TechAttackData, TechAttackOptions> for SetAttackEffects {
    async fn run(
        &self,
        state: &mut FlowState<TechAttackData>,
        _options: &TechAttackOptions,
    ) -> StepResult {
        if state.data.effect.is_some() {
            return Ok(true);
        }
        let Some(id) = state.item_id() else {
            return Ok(true);
        };

        let item = self.services.documents.item(id).await?;
        let effect = match &item.system {
            ItemSystem::MechSystem(system) => Some(&system.effect),
            ItemSystem::NpcFeature(feature) => match &feature.feature {
                NpcFeatureKind::Tech(tech) => Some(&tech.effect),
                NpcFeatureKind::System { effect } | NpcFeatureKind::Trait { effect } => {
                    Some(effect)
                }
            },
            _ => None,
        };
        state.data.effect = effect.filter(|text| !text.is_empty()).cloned();
        Ok(true)
    }
}

/// Refreshes every staged target from its document.
///
/// Targets that no longer exist are dropped; lock on can only be consumed
/// while the target still has it.
pub struct SetAttackTargets {
    services: FlowServices,
}

impl SetAttackTargets {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Step<TechAttackData, TechAttackOptions> for SetAttackTargets {
    async fn run(
        &self,
        state: &mut FlowState<TechAttackData>,
        _options: &TechAttackOptions,
    ) -> StepResult {
        let staged = acc_diff(state)?.targets.clone();

        let mut targets: Vec<AccDiffTarget> = Vec::with_capacity(staged.len());
        for mut target in staged {
            match self.services.documents.actor(&target.target).await {
                Ok(actor) => {
                    target.name = actor.name.clone();
                    target.e_defense = actor.e_defense();
                    target.lock_on_available = actor.has_status(StatusKind::LockOn);
                    target.consume_lock_on &= target.lock_on_available;
                    targets.push(target);
                }
                Err(DocumentError::ActorNotFound(id)) => {
                    warn!(target: "runtime::tech", target_id = %id, "dropping vanished target");
                }
                Err(error) => return Err(error.into()),
            }
        }

        if let Some(acc_diff) = state.data.acc_diff.as_mut() {
            acc_diff.targets = targets;
        }
        Ok(true)
    }
}

/// Lets the operator confirm or adjust accuracy and difficulty.
///
/// Cancelling stops the flow before anything is rolled or written.
pub struct ShowAttackHud {
    services: FlowServices,
}

impl ShowAttackHud {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Step<TechAttackData, TechAttackOptions> for ShowAttackHud {
    async fn run(
        &self,
        state: &mut FlowState<TechAttackData>,
        _options: &TechAttackOptions,
    ) -> StepResult {
        let proposed = acc_diff(state)?;
        let confirmed = self.services.prompt.confirm(proposed).await;
        match confirmed {
            Some(confirmed) => {
                state.data.acc_diff = Some(confirmed);
                Ok(true)
            }
            None => {
                self.services
                    .notifier
                    .info(&format!("{} cancelled.", state.data.title));
                Ok(false)
            }
        }
    }
}

/// Rolls once per target, or once untargeted when nothing is targeted.
pub struct RollAttacks {
    services: FlowServices,
}

impl RollAttacks {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Step<TechAttackData, TechAttackOptions> for RollAttacks {
    async fn run(
        &self,
        state: &mut FlowState<TechAttackData>,
        _options: &TechAttackOptions,
    ) -> StepResult {
        let acc_diff = acc_diff(state)?.clone();
        let flat_bonus = state.data.flat_bonus;

        let base = RollFormula::new(flat_bonus, acc_diff.untargeted_total());
        state.data.roll_str = base.to_string();
        state.data.attack_rolls.roll = base.to_string();

        if acc_diff.targets.is_empty() {
            let outcome = self
                .services
                .dice
                .roll(base)
                .await
                .map_err(anyhow::Error::from)?;
            debug!(
                target: "runtime::tech",
                roll = %outcome.formula,
                total = outcome.total,
                "untargeted roll"
            );
            state.data.attack_results.push(outcome);
            return Ok(true);
        }

        for target in &acc_diff.targets {
            let formula = RollFormula::new(flat_bonus, acc_diff.total_for(target));
            let outcome = self
                .services
                .dice
                .roll(formula)
                .await
                .map_err(anyhow::Error::from)?;

            let hit = outcome.hits(target.e_defense);
            debug!(
                target: "runtime::tech",
                target_id = %target.target,
                roll = %outcome.formula,
                total = outcome.total,
                hit,
                "targeted roll"
            );

            let data = &mut state.data;
            data.attack_rolls.targeted.push(TargetedRoll {
                target: target.target.clone(),
                name: target.name.clone(),
                roll: formula.to_string(),
                used_lock_on: target.uses_lock_on(),
            });
            data.hit_results.push(HitResult {
                target: target.target.clone(),
                name: target.name.clone(),
                total: outcome.total,
                used_lock_on: target.uses_lock_on(),
                hit,
                crit: hit && outcome.is_crit(),
            });
            data.attack_results.push(outcome);
        }
        Ok(true)
    }
}
