//! Partial document updates committed by flow steps.
//!
//! Steps never mutate documents directly; they hand a patch to the document
//! store, which applies it atomically per document.

use crate::actor::{Actor, ActorSystem};
use crate::item::{Item, ItemSystem, Uses};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorPatch {
    /// New current heat.
    pub heat: Option<u32>,
}

impl ActorPatch {
    pub fn is_empty(&self) -> bool {
        self.heat.is_none()
    }

    pub fn apply(&self, actor: &mut Actor) {
        let Some(heat) = self.heat else { return };
        match &mut actor.system {
            ActorSystem::Mech(mech) => mech.heat.value = heat,
            ActorSystem::Npc(npc) => npc.heat.value = heat,
            ActorSystem::Pilot(_) | ActorSystem::Deployable(_) => {}
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPatch {
    pub uses: Option<i32>,
    pub charged: Option<bool>,
    pub loaded: Option<bool>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.uses.is_none() && self.charged.is_none() && self.loaded.is_none()
    }

    /// Applies the fields the item tracks; others are ignored.
    pub fn apply(&self, item: &mut Item) {
        match &mut item.system {
            ItemSystem::MechWeapon(data) => {
                set_uses(&mut data.uses, self.uses);
                if let Some(loaded) = self.loaded {
                    data.loaded = loaded;
                }
            }
            ItemSystem::MechSystem(data) => set_uses(&mut data.uses, self.uses),
            ItemSystem::PilotGear(data) => set_uses(&mut data.uses, self.uses),
            ItemSystem::NpcFeature(data) => {
                set_uses(&mut data.uses, self.uses);
                if let Some(charged) = self.charged {
                    data.charged = charged;
                }
                if let Some(loaded) = self.loaded {
                    data.loaded = loaded;
                }
            }
            ItemSystem::Frame(_) | ItemSystem::WeaponMod(_) | ItemSystem::Status(_) => {}
        }
    }
}

fn set_uses(uses: &mut Option<Uses>, value: Option<i32>) {
    if let (Some(uses), Some(value)) = (uses.as_mut(), value) {
        uses.value = value;
    }
}
