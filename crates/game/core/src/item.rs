//! Item documents: frames, weapons, systems, NPC features, and statuses.

use flow_engine::DocumentId;

use crate::actor::StatusKind;
use crate::tags::{self, Tag, lids};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Frame,
    MechWeapon,
    MechSystem,
    WeaponMod,
    NpcFeature,
    Status,
    PilotGear,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActivationType {
    Free,
    Quick,
    Full,
    Invade,
    QuickTech,
    FullTech,
    Protocol,
    Reaction,
}

/// Remaining/maximum uses of a limited item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uses {
    pub value: i32,
    pub max: i32,
}

/// An activatable action granted by an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionData {
    pub name: String,
    pub activation: ActivationType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameData {
    pub lid: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MechWeaponData {
    pub tags: Vec<Tag>,
    pub destroyed: bool,
    pub uses: Option<Uses>,
    pub loaded: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MechSystemData {
    pub effect: String,
    pub tags: Vec<Tag>,
    pub actions: Vec<ActionData>,
    pub destroyed: bool,
    pub uses: Option<Uses>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponModData {
    pub tags: Vec<Tag>,
    pub destroyed: bool,
}

/// Tier-indexed tech attack tables of an NPC feature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NpcTechData {
    pub accuracy: Vec<i32>,
    pub attack_bonus: Vec<i32>,
    pub effect: String,
}

impl NpcTechData {
    /// `(accuracy, attack_bonus)` for a 0-based tier index; missing entries
    /// count as zero.
    pub fn at_tier(&self, tier_index: usize) -> (i32, i32) {
        (
            self.accuracy.get(tier_index).copied().unwrap_or(0),
            self.attack_bonus.get(tier_index).copied().unwrap_or(0),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NpcFeatureKind {
    Tech(NpcTechData),
    System { effect: String },
    Trait { effect: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcFeatureData {
    pub feature: NpcFeatureKind,
    /// 0-based tier table index overriding the owner's tier. Zero means no
    /// override.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tier_override: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<Tag>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub destroyed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses: Option<Uses>,
    #[cfg_attr(feature = "serde", serde(default = "charged_by_default"))]
    pub charged: bool,
    #[cfg_attr(feature = "serde", serde(default = "charged_by_default"))]
    pub loaded: bool,
}

#[cfg(feature = "serde")]
fn charged_by_default() -> bool {
    true
}

impl NpcFeatureData {
    pub fn tech(tech: NpcTechData) -> Self {
        Self {
            feature: NpcFeatureKind::Tech(tech),
            tier_override: None,
            tags: Vec::new(),
            destroyed: false,
            uses: None,
            charged: true,
            loaded: true,
        }
    }

    /// 0-based index into tier tables for an owner of the given tier.
    pub fn tier_index(&self, owner_tier: u8) -> usize {
        match self.tier_override {
            Some(index) if index > 0 => usize::from(index),
            _ => usize::from(owner_tier.saturating_sub(1)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PilotGearData {
    pub tags: Vec<Tag>,
    pub uses: Option<Uses>,
}

/// Kind-specific data of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemSystem {
    Frame(FrameData),
    MechWeapon(MechWeaponData),
    MechSystem(MechSystemData),
    WeaponMod(WeaponModData),
    NpcFeature(NpcFeatureData),
    Status(StatusKind),
    PilotGear(PilotGearData),
}

/// An item document as read from the document store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: DocumentId,
    pub name: String,
    /// Actor holding this item, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner: Option<DocumentId>,
    pub system: ItemSystem,
}

impl Item {
    pub fn new(id: impl Into<DocumentId>, name: impl Into<String>, system: ItemSystem) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: None,
            system,
        }
    }

    pub fn owned_by(mut self, owner: impl Into<DocumentId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn kind(&self) -> ItemKind {
        match self.system {
            ItemSystem::Frame(_) => ItemKind::Frame,
            ItemSystem::MechWeapon(_) => ItemKind::MechWeapon,
            ItemSystem::MechSystem(_) => ItemKind::MechSystem,
            ItemSystem::WeaponMod(_) => ItemKind::WeaponMod,
            ItemSystem::NpcFeature(_) => ItemKind::NpcFeature,
            ItemSystem::Status(_) => ItemKind::Status,
            ItemSystem::PilotGear(_) => ItemKind::PilotGear,
        }
    }

    pub fn mech_system(&self) -> Option<&MechSystemData> {
        match &self.system {
            ItemSystem::MechSystem(data) => Some(data),
            _ => None,
        }
    }

    pub fn npc_feature(&self) -> Option<&NpcFeatureData> {
        match &self.system {
            ItemSystem::NpcFeature(data) => Some(data),
            _ => None,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        match &self.system {
            ItemSystem::MechWeapon(data) => &data.tags,
            ItemSystem::MechSystem(data) => &data.tags,
            ItemSystem::WeaponMod(data) => &data.tags,
            ItemSystem::NpcFeature(data) => &data.tags,
            ItemSystem::PilotGear(data) => &data.tags,
            ItemSystem::Frame(_) | ItemSystem::Status(_) => &[],
        }
    }

    pub fn is_destroyed(&self) -> bool {
        match &self.system {
            ItemSystem::MechWeapon(data) => data.destroyed,
            ItemSystem::MechSystem(data) => data.destroyed,
            ItemSystem::WeaponMod(data) => data.destroyed,
            ItemSystem::NpcFeature(data) => data.destroyed,
            ItemSystem::Frame(_) | ItemSystem::Status(_) | ItemSystem::PilotGear(_) => false,
        }
    }

    pub fn uses(&self) -> Option<Uses> {
        match &self.system {
            ItemSystem::MechWeapon(data) => data.uses,
            ItemSystem::MechSystem(data) => data.uses,
            ItemSystem::NpcFeature(data) => data.uses,
            ItemSystem::PilotGear(data) => data.uses,
            ItemSystem::Frame(_) | ItemSystem::WeaponMod(_) | ItemSystem::Status(_) => None,
        }
    }

    pub fn is_limited(&self) -> bool {
        tags::has(self.tags(), lids::LIMITED)
    }

    pub fn is_recharge(&self) -> bool {
        tags::has(self.tags(), lids::RECHARGE)
    }

    pub fn is_loading(&self) -> bool {
        tags::has(self.tags(), lids::LOADING)
    }

    /// Limited item whose uses have run out.
    pub fn is_exhausted(&self) -> bool {
        self.is_limited() && self.uses().is_some_and(|uses| uses.value <= 0)
    }

    /// Recharge state; `None` for items that do not track it.
    pub fn charged(&self) -> Option<bool> {
        self.npc_feature().map(|data| data.charged)
    }

    /// Loading state; `None` for items that do not track it.
    pub fn loaded(&self) -> Option<bool> {
        match &self.system {
            ItemSystem::MechWeapon(data) => Some(data.loaded),
            ItemSystem::NpcFeature(data) => Some(data.loaded),
            _ => None,
        }
    }

    /// Heat inflicted on the user by activating this item.
    pub fn self_heat(&self) -> Option<i32> {
        tags::find(self.tags(), lids::HEAT_SELF).and_then(Tag::value)
    }

    /// Resolves an action by path.
    ///
    /// Accepts `system.actions.N`, `actions.N`, or a bare index `N`.
    pub fn action(&self, path: &str) -> Option<&ActionData> {
        let path = path.strip_prefix("system.").unwrap_or(path);
        let index: usize = path.strip_prefix("actions.").unwrap_or(path).parse().ok()?;
        self.mech_system()?.actions.get(index)
    }
}
