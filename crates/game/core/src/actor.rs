//! Actor documents: mechs, NPCs, pilots, and deployables.

use flow_engine::DocumentId;

use crate::bonus::{BonusContext, BonusData, BonusError, apply_tech_bonuses};

/// Bonus lid that modifies the tech attack stat.
pub const TECH_ATTACK_BONUS: &str = "tech_attack";

/// Frame whose pilots gain +1 accuracy on tech attacks.
pub const GOBLIN_FRAME: &str = "mf_goblin";

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActorKind {
    Mech,
    Npc,
    Pilot,
    Deployable,
}

/// Conditions and statuses that matter to attack resolution.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusKind {
    /// Attackers may consume it for +1 accuracy.
    LockOn,
    /// +1 difficulty on all attacks.
    Impaired,
    Jammed,
    Shredded,
    Exposed,
    Invisible,
    Prone,
    Slowed,
    Stunned,
}

/// Current/maximum pair for a depleting or accumulating resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub value: u32,
    pub max: u32,
}

impl ResourceMeter {
    pub const fn new(value: u32, max: u32) -> Self {
        Self { value, max }
    }

    /// Heat may exceed its cap; the excess is what triggers an overheat.
    pub fn is_over_capacity(&self) -> bool {
        self.value > self.max
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MechData {
    pub tech_attack: i32,
    pub e_defense: i32,
    pub heat: ResourceMeter,
    /// Lid of the installed frame.
    #[cfg_attr(feature = "serde", serde(default))]
    pub frame: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pilot: Option<DocumentId>,
    /// Pilot license level, used for bonus placeholders.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ll: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcData {
    /// 1-based tier.
    pub tier: u8,
    pub sys: i32,
    pub e_defense: i32,
    pub heat: ResourceMeter,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PilotData {
    pub tech_attack: i32,
    pub e_defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ll: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeployableData {
    pub e_defense: i32,
}

/// Kind-specific stats of an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorSystem {
    Mech(MechData),
    Npc(NpcData),
    Pilot(PilotData),
    Deployable(DeployableData),
}

/// An actor document as read from the document store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: DocumentId,
    pub name: String,
    pub system: ActorSystem,
    #[cfg_attr(feature = "serde", serde(default))]
    pub statuses: Vec<StatusKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: Vec<BonusData>,
}

impl Actor {
    pub fn new(id: impl Into<DocumentId>, name: impl Into<String>, system: ActorSystem) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            system,
            statuses: Vec::new(),
            bonuses: Vec::new(),
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self.system {
            ActorSystem::Mech(_) => ActorKind::Mech,
            ActorSystem::Npc(_) => ActorKind::Npc,
            ActorSystem::Pilot(_) => ActorKind::Pilot,
            ActorSystem::Deployable(_) => ActorKind::Deployable,
        }
    }

    pub fn is_mech(&self) -> bool {
        matches!(self.system, ActorSystem::Mech(_))
    }

    pub fn is_npc(&self) -> bool {
        matches!(self.system, ActorSystem::Npc(_))
    }

    pub fn is_pilot(&self) -> bool {
        matches!(self.system, ActorSystem::Pilot(_))
    }

    pub fn mech(&self) -> Option<&MechData> {
        match &self.system {
            ActorSystem::Mech(mech) => Some(mech),
            _ => None,
        }
    }

    pub fn npc(&self) -> Option<&NpcData> {
        match &self.system {
            ActorSystem::Npc(npc) => Some(npc),
            _ => None,
        }
    }

    pub fn has_status(&self, status: StatusKind) -> bool {
        self.statuses.contains(&status)
    }

    pub fn heat(&self) -> Option<ResourceMeter> {
        match &self.system {
            ActorSystem::Mech(mech) => Some(mech.heat),
            ActorSystem::Npc(npc) => Some(npc.heat),
            ActorSystem::Pilot(_) | ActorSystem::Deployable(_) => None,
        }
    }

    pub fn e_defense(&self) -> i32 {
        match &self.system {
            ActorSystem::Mech(mech) => mech.e_defense,
            ActorSystem::Npc(npc) => npc.e_defense,
            ActorSystem::Pilot(pilot) => pilot.e_defense,
            ActorSystem::Deployable(deployable) => deployable.e_defense,
        }
    }

    /// True for mechs built on the Goblin frame.
    pub fn has_goblin_frame(&self) -> bool {
        self.mech()
            .and_then(|mech| mech.frame.as_deref())
            .is_some_and(|lid| lid == GOBLIN_FRAME)
    }

    pub fn bonus_context(&self) -> BonusContext {
        let ll = match &self.system {
            ActorSystem::Mech(mech) => mech.ll,
            ActorSystem::Pilot(pilot) => pilot.ll,
            ActorSystem::Npc(_) | ActorSystem::Deployable(_) => 0,
        };
        BonusContext {
            ll,
            grit: i32::from(ll.div_ceil(2)),
            tier: self.npc().map_or(0, |npc| npc.tier),
        }
    }

    /// Flat bonus for a bare tech attack by this actor.
    ///
    /// Mechs and pilots use their tech attack stat (with `tech_attack`
    /// bonuses applied), NPCs their systems rating. Deployables cannot make
    /// tech attacks.
    pub fn tech_attack(&self) -> Result<Option<i32>, BonusError> {
        let base = match &self.system {
            ActorSystem::Mech(mech) => mech.tech_attack,
            ActorSystem::Pilot(pilot) => pilot.tech_attack,
            ActorSystem::Npc(npc) => return Ok(Some(npc.sys)),
            ActorSystem::Deployable(_) => return Ok(None),
        };
        apply_tech_bonuses(base, &self.bonuses, TECH_ATTACK_BONUS, &self.bonus_context()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mech(tech_attack: i32) -> Actor {
        Actor::new(
            "mech",
            "Everest",
            ActorSystem::Mech(MechData {
                tech_attack,
                e_defense: 8,
                heat: ResourceMeter::new(0, 6),
                frame: None,
                pilot: Some(DocumentId::new("pilot")),
                ll: 3,
            }),
        )
    }

    #[test]
    fn tech_attack_applies_bonuses() {
        let mut actor = mech(1);
        assert_eq!(actor.tech_attack(), Ok(Some(1)));

        actor.bonuses.push(BonusData::new(TECH_ATTACK_BONUS, "{grit}"));
        assert_eq!(actor.tech_attack(), Ok(Some(3)));
    }

    #[test]
    fn npc_uses_systems_rating() {
        let npc = Actor::new(
            "npc",
            "Hornet",
            ActorSystem::Npc(NpcData {
                tier: 2,
                sys: 3,
                e_defense: 10,
                heat: ResourceMeter::new(0, 4),
            }),
        );
        assert_eq!(npc.tech_attack(), Ok(Some(3)));
        assert_eq!(npc.bonus_context().tier, 2);
    }

    #[test]
    fn deployables_cannot_tech_attack() {
        let drone = Actor::new(
            "drone",
            "Drone",
            ActorSystem::Deployable(DeployableData { e_defense: 10 }),
        );
        assert_eq!(drone.tech_attack(), Ok(None));
        assert_eq!(drone.heat(), None);
    }

    #[test]
    fn goblin_frame_detection() {
        let mut actor = mech(0);
        assert!(!actor.has_goblin_frame());
        if let ActorSystem::Mech(data) = &mut actor.system {
            data.frame = Some(GOBLIN_FRAME.to_string());
        }
        assert!(actor.has_goblin_frame());
    }

    #[test]
    fn status_kinds_parse_case_insensitively() {
        assert_eq!("lock_on".parse::<StatusKind>(), Ok(StatusKind::LockOn));
        assert_eq!("IMPAIRED".parse::<StatusKind>(), Ok(StatusKind::Impaired));
        assert_eq!(StatusKind::LockOn.to_string(), "lock_on");
    }
}
