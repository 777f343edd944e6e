//! Seeds tech attack data from the subject actor or item.

use async_trait::async_trait;
use flow_engine::{FlowState, Step, StepResult};
use game_core::{
    AccDiffData, ActivationType, Actor, AttackType, Item, ItemSystem, MechSystemData,
    NpcFeatureData, NpcFeatureKind, Tag,
};
use tracing::{debug, warn};

use super::{TechAttackData, TechAttackOptions};
use crate::services::FlowServices;

const BARE_TITLE: &str = "TECH ATTACK";

/// Resolves title, flat bonus, base accuracy and the accuracy/difficulty
/// bundle.
///
/// - bare mech or NPC: stat-based flat bonus
/// - NPC tech feature: tier-indexed accuracy and attack bonus
/// - mech system: mech tech attack, optionally one of the system's actions
///
/// Goblin frames start with one accuracy, except on NPC features whose
/// accuracy comes from the tier table. A resolved system action always names
/// the attack, even over a caller-supplied title.
pub struct InitTechAttackData {
    services: FlowServices,
}

impl InitTechAttackData {
    pub fn new(services: FlowServices) -> Self {
        Self { services }
    }

    async fn selected_targets(&self) -> Vec<Actor> {
        let mut targets = Vec::new();
        for id in self.services.targets.current() {
            match self.services.documents.actor(&id).await {
                Ok(actor) => targets.push(actor),
                Err(error) => {
                    warn!(target: "runtime::tech", target_id = %id, %error, "skipping unknown target");
                }
            }
        }
        targets
    }

    async fn acc_diff(
        &self,
        options: &TechAttackOptions,
        attacker: &Actor,
        tags: &[Tag],
        title: &str,
        accuracy: i32,
    ) -> AccDiffData {
        match &options.acc_diff {
            Some(acc_diff) => acc_diff.clone(),
            None => {
                let targets = self.selected_targets().await;
                AccDiffData::from_params(attacker, tags, title, &targets, accuracy)
            }
        }
    }

    async fn init_bare(
        &self,
        state: &mut FlowState<TechAttackData>,
        options: &TechAttackOptions,
        actor: &Actor,
        accuracy: i32,
    ) -> StepResult {
        if !(actor.is_mech() || actor.is_npc()) {
            self.services
                .notifier
                .error("Error rolling tech attack macro (not a valid tech attacker).");
            return Ok(false);
        }

        let title = options.title.clone().unwrap_or_else(|| BARE_TITLE.to_string());
        let flat_bonus = match options.flat_bonus {
            Some(bonus) => bonus,
            None => actor.tech_attack().map_err(anyhow::Error::from)?.unwrap_or(0),
        };
        let acc_diff = self.acc_diff(options, actor, &[], &title, accuracy).await;

        let data = &mut state.data;
        data.title = title;
        data.attack_type = AttackType::Tech;
        data.flat_bonus = flat_bonus;
        data.acc_diff = Some(acc_diff);
        Ok(true)
    }

    async fn init_npc_feature(
        &self,
        state: &mut FlowState<TechAttackData>,
        options: &TechAttackOptions,
        actor: &Actor,
        item: &Item,
        feature: &NpcFeatureData,
    ) -> StepResult {
        let Some(npc) = actor.npc() else {
            self.services.notifier.warn("Non-NPC cannot use an NPC system!");
            return Ok(false);
        };
        let NpcFeatureKind::Tech(tech) = &feature.feature else {
            return Ok(self.invalid_item(item));
        };

        let tier_index = feature.tier_index(npc.tier);
        let (accuracy, attack_bonus) = tech.at_tier(tier_index);
        debug!(
            target: "runtime::tech",
            item = %item.id,
            tier_index,
            accuracy,
            attack_bonus,
            "npc tech profile"
        );

        let title = state.data.title.clone();
        let acc_diff = self
            .acc_diff(options, actor, &feature.tags, &title, accuracy)
            .await;

        let data = &mut state.data;
        data.flat_bonus = options.flat_bonus.unwrap_or(attack_bonus);
        data.acc_diff = Some(acc_diff);
        Ok(true)
    }

    async fn init_mech_system(
        &self,
        state: &mut FlowState<TechAttackData>,
        options: &TechAttackOptions,
        actor: &Actor,
        item: &Item,
        system: &MechSystemData,
        accuracy: i32,
    ) -> StepResult {
        let Some(mech) = actor.mech() else {
            self.services.notifier.warn("Non-mech cannot use a mech system!");
            return Ok(false);
        };
        if mech.pilot.is_none() {
            self.services
                .notifier
                .warn("Cannot use a system on a non-piloted mech!");
            return Ok(false);
        }

        let action = options.action_path.as_deref().and_then(|path| {
            let action = item.action(path);
            if action.is_none() {
                warn!(target: "runtime::tech", item = %item.id, path, "no action at path");
            }
            action
        });

        let data = &mut state.data;
        data.flat_bonus = match options.flat_bonus {
            Some(bonus) => bonus,
            None => actor.tech_attack().map_err(anyhow::Error::from)?.unwrap_or(0),
        };
        data.tags = system.tags.clone();
        match action {
            Some(action) => {
                data.invade = action.activation == ActivationType::Invade;
                data.title = if data.invade {
                    format!("INVADE // {}", action.name)
                } else {
                    action.name.clone()
                };
                data.effect = Some(action.detail.clone());
            }
            None => data.effect = Some(system.effect.clone()),
        }

        let title = state.data.title.clone();
        let acc_diff = self
            .acc_diff(options, actor, &system.tags, &title, accuracy)
            .await;
        state.data.acc_diff = Some(acc_diff);
        Ok(true)
    }

    fn invalid_item(&self, item: &Item) -> bool {
        self.services.notifier.error(&format!(
            "Error in tech attack flow - {} is an invalid type!",
            item.name
        ));
        false
    }
}

#[async_trait]
impl Step<TechAttackData, TechAttackOptions> for InitTechAttackData {
    async fn run(
        &self,
        state: &mut FlowState<TechAttackData>,
        options: &TechAttackOptions,
    ) -> StepResult {
        let actor = self.services.documents.actor(state.actor_id()).await?;
        let accuracy = i32::from(actor.has_goblin_frame());

        let Some(item_id) = state.item_id().cloned() else {
            return self.init_bare(state, options, &actor, accuracy).await;
        };
        let item = self.services.documents.item(&item_id).await?;

        state.data.title = options.title.clone().unwrap_or_else(|| item.name.clone());
        state.data.attack_type = AttackType::Tech;

        match &item.system {
            ItemSystem::NpcFeature(feature) => {
                self.init_npc_feature(state, options, &actor, &item, feature)
                    .await
            }
            ItemSystem::MechSystem(system) => {
                self.init_mech_system(state, options, &actor, &item, system, accuracy)
                    .await
            }
            _ => Ok(self.invalid_item(&item)),
        }
    }
}
