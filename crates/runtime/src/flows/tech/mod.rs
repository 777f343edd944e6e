//! Tech attacks.
//!
//! A tech attack is made by a bare actor (mech, NPC, or pilot), an NPC tech
//! feature, or a mech system. Steps run in this order:
//!
//! | step | effect |
//! |------|--------|
//! | `initTechAttackData` | title, flat bonus, accuracy bundle |
//! | `checkItemDestroyed` | stop if the item is destroyed |
//! | `checkItemLimited` | stop if a limited item is out of uses |
//! | `checkItemCharged` | stop if a recharge item is spent |
//! | `setAttackTags` | item tags |
//! | `setAttackEffects` | item effect text |
//! | `setAttackTargets` | refresh staged targets |
//! | `showAttackHUD` | operator confirmation |
//! | `rollAttacks` | one roll per target |
//! | `applySelfHeat` | commit self heat |
//! | `updateItemAfterAction` | commit uses, charge, load |
//! | `printTechAttackCard` | render the card |
//!
//! Tech attacks that deal direct damage and picking invade options per hit
//! have no steps yet.

mod attack;
mod card;
mod data;
mod init;

use flow_engine::{DocumentId, Flow, FlowReport, FlowState, StepRegistry, Subject};
use tracing::info;

pub use attack::{RollAttacks, SetAttackEffects, SetAttackTags, SetAttackTargets, ShowAttackHud};
pub use card::{PrintTechAttackCard, TechAttackCard};
pub use data::{
    AttackRolls, DamageResult, HitResult, TargetedRoll, TechAttackData, TechAttackOptions,
};
pub use init::InitTechAttackData;

use super::item::{
    ApplySelfHeat, CheckItemCharged, CheckItemDestroyed, CheckItemLimited, UpdateItemAfterAction,
};
use crate::api::Result;
use crate::services::FlowServices;

/// A tech attack, ready to begin.
///
/// The step registry may still be edited through [`steps_mut`](Self::steps_mut)
/// before [`begin`](Self::begin).
pub struct TechAttackFlow {
    flow: Flow<TechAttackData, TechAttackOptions>,
}

impl TechAttackFlow {
    pub const KIND: &'static str = "TechAttackFlow";

    /// Registered step names, in execution order.
    pub const STEPS: [&'static str; 12] = [
        "initTechAttackData",
        "checkItemDestroyed",
        "checkItemLimited",
        "checkItemCharged",
        "setAttackTags",
        "setAttackEffects",
        "setAttackTargets",
        "showAttackHUD",
        "rollAttacks",
        "applySelfHeat",
        "updateItemAfterAction",
        "printTechAttackCard",
    ];

    /// Builds a tech attack for `subject`, seeding its data from `data`.
    pub fn new(services: &FlowServices, subject: Subject, data: TechAttackData) -> Result<Self> {
        let state = FlowState::new(Self::KIND, subject, TechAttackData::seeded(data))?;
        let mut flow = Flow::new(state, services.hooks.clone());

        let steps = flow.steps_mut();
        steps.set("initTechAttackData", InitTechAttackData::new(services.clone()));
        steps.set("checkItemDestroyed", CheckItemDestroyed::new(services.clone()));
        steps.set("checkItemLimited", CheckItemLimited::new(services.clone()));
        steps.set("checkItemCharged", CheckItemCharged::new(services.clone()));
        steps.set("setAttackTags", SetAttackTags::new(services.clone()));
        steps.set("setAttackEffects", SetAttackEffects::new(services.clone()));
        steps.set("setAttackTargets", SetAttackTargets::new(services.clone()));
        steps.set("showAttackHUD", ShowAttackHud::new(services.clone()));
        steps.set("rollAttacks", RollAttacks::new(services.clone()));
        steps.set("applySelfHeat", ApplySelfHeat::new(services.clone()));
        steps.set("updateItemAfterAction", UpdateItemAfterAction::new(services.clone()));
        steps.set("printTechAttackCard", PrintTechAttackCard::new(services.clone()));

        Ok(Self { flow })
    }

    /// A bare tech attack by an actor.
    pub fn for_actor(
        services: &FlowServices,
        actor: impl Into<DocumentId>,
        data: TechAttackData,
    ) -> Result<Self> {
        Self::new(services, Subject::actor(actor), data)
    }

    /// A tech attack made with an item, on behalf of the item's owner.
    pub async fn for_item(
        services: &FlowServices,
        item: &DocumentId,
        data: TechAttackData,
    ) -> Result<Self> {
        let subject = services.documents.subject_for_item(item).await?;
        Self::new(services, subject, data)
    }

    pub fn state(&self) -> &FlowState<TechAttackData> {
        self.flow.state()
    }

    pub fn steps(&self) -> &StepRegistry<TechAttackData, TechAttackOptions> {
        self.flow.steps()
    }

    pub fn steps_mut(&mut self) -> &mut StepRegistry<TechAttackData, TechAttackOptions> {
        self.flow.steps_mut()
    }

    pub async fn begin(self, options: &TechAttackOptions) -> FlowReport<TechAttackData> {
        let report = self.flow.begin(options).await;
        info!(
            target: "runtime::tech",
            actor = %report.state().actor_id(),
            outcome = report.outcome().as_str(),
            aborted_at = report.aborted_at(),
            rolls = report.state().data.attack_results.len(),
            "tech attack resolved"
        );
        report
    }
}
