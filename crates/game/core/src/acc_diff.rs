//! Accuracy/difficulty bundle for a single attack.
//!
//! Accuracy and difficulty cancel each other out; the net value decides how
//! many d6 are rolled alongside the d20 and whether the highest die is added
//! or subtracted. Each target carries its own modifiers on top of the base.

use flow_engine::DocumentId;

use crate::actor::{Actor, StatusKind};
use crate::tags::{self, Tag, lids};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Cover {
    #[default]
    None,
    Soft,
    Hard,
}

impl Cover {
    /// Difficulty granted to the attacker.
    pub const fn difficulty(self) -> i32 {
        match self {
            Cover::None => 0,
            Cover::Soft => 1,
            Cover::Hard => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccDiffBase {
    pub accuracy: i32,
    pub difficulty: i32,
}

/// Weapon/system traits that shift accuracy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccDiffWeapon {
    pub accurate: bool,
    pub inaccurate: bool,
    /// Ignores cover.
    pub seeking: bool,
}

impl AccDiffWeapon {
    pub fn from_tags(tags: &[Tag]) -> Self {
        Self {
            accurate: tags::has(tags, lids::ACCURATE),
            inaccurate: tags::has(tags, lids::INACCURATE),
            seeking: tags::has(tags, lids::SEEKING),
        }
    }

    fn net(&self) -> i32 {
        i32::from(self.accurate) - i32::from(self.inaccurate)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccDiffTarget {
    pub target: DocumentId,
    pub name: String,
    pub e_defense: i32,
    pub accuracy: i32,
    pub difficulty: i32,
    pub cover: Cover,
    pub lock_on_available: bool,
    /// Set during confirmation when the attacker spends the target's lock on.
    pub consume_lock_on: bool,
}

impl AccDiffTarget {
    pub fn from_actor(target: &Actor) -> Self {
        Self {
            target: target.id.clone(),
            name: target.name.clone(),
            e_defense: target.e_defense(),
            accuracy: 0,
            difficulty: 0,
            cover: Cover::None,
            lock_on_available: target.has_status(StatusKind::LockOn),
            consume_lock_on: false,
        }
    }

    /// Lock on is only spent if the target actually has it.
    pub fn uses_lock_on(&self) -> bool {
        self.lock_on_available && self.consume_lock_on
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccDiffData {
    pub title: String,
    pub base: AccDiffBase,
    pub weapon: AccDiffWeapon,
    pub targets: Vec<AccDiffTarget>,
}

impl AccDiffData {
    /// Builds the bundle for an attacker, the attack's tags and the current
    /// target selection.
    pub fn from_params(
        attacker: &Actor,
        tags: &[Tag],
        title: impl Into<String>,
        targets: &[Actor],
        starting_accuracy: i32,
    ) -> Self {
        let difficulty = i32::from(attacker.has_status(StatusKind::Impaired));
        Self {
            title: title.into(),
            base: AccDiffBase {
                accuracy: starting_accuracy,
                difficulty,
            },
            weapon: AccDiffWeapon::from_tags(tags),
            targets: targets.iter().map(AccDiffTarget::from_actor).collect(),
        }
    }

    /// Net accuracy when no target is selected.
    pub fn untargeted_total(&self) -> i32 {
        self.base
            .accuracy
            .saturating_sub(self.base.difficulty)
            .saturating_add(self.weapon.net())
    }

    /// Net accuracy against one target.
    pub fn total_for(&self, target: &AccDiffTarget) -> i32 {
        let cover = if self.weapon.seeking {
            0
        } else {
            target.cover.difficulty()
        };
        self.untargeted_total()
            .saturating_add(target.accuracy)
            .saturating_sub(target.difficulty)
            .saturating_sub(cover)
            .saturating_add(i32::from(target.uses_lock_on()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorSystem, NpcData, PilotData, ResourceMeter};

    fn pilot() -> Actor {
        Actor::new(
            "pilot",
            "Ace",
            ActorSystem::Pilot(PilotData {
                tech_attack: 1,
                e_defense: 10,
                ll: 0,
            }),
        )
    }

    fn npc(id: &str) -> Actor {
        Actor::new(
            id,
            "Grunt",
            ActorSystem::Npc(NpcData {
                tier: 1,
                sys: 0,
                e_defense: 8,
                heat: ResourceMeter::new(0, 0),
            }),
        )
    }

    #[test]
    fn impaired_attacker_adds_difficulty() {
        let mut attacker = pilot();
        attacker.statuses.push(StatusKind::Impaired);
        let data = AccDiffData::from_params(&attacker, &[], "Hack", &[], 1);
        assert_eq!(data.base, AccDiffBase { accuracy: 1, difficulty: 1 });
        assert_eq!(data.untargeted_total(), 0);
    }

    #[test]
    fn lock_on_counts_only_when_consumed() {
        let mut target = npc("t1");
        target.statuses.push(StatusKind::LockOn);
        let mut data = AccDiffData::from_params(&pilot(), &[], "Hack", &[target], 0);

        assert!(data.targets[0].lock_on_available);
        assert_eq!(data.total_for(&data.targets[0]), 0);

        data.targets[0].consume_lock_on = true;
        assert_eq!(data.total_for(&data.targets[0]), 1);
    }

    #[test]
    fn seeking_ignores_cover() {
        let tags = vec![Tag::new(lids::SEEKING), Tag::new(lids::ACCURATE)];
        let mut data = AccDiffData::from_params(&pilot(), &tags, "Hack", &[npc("t1")], 0);
        data.targets[0].cover = Cover::Hard;
        assert_eq!(data.total_for(&data.targets[0]), 1);

        data.weapon.seeking = false;
        assert_eq!(data.total_for(&data.targets[0]), -1);
    }

    #[test]
    fn totals_saturate() {
        let mut data = AccDiffData::from_params(&pilot(), &[], "Hack", &[npc("t1")], i32::MAX);
        data.targets[0].accuracy = i32::MAX;
        assert_eq!(data.untargeted_total(), i32::MAX);
        assert_eq!(data.total_for(&data.targets[0]), i32::MAX);

        data.base.accuracy = 0;
        data.targets[0].accuracy = 0;
        data.targets[0].difficulty = i32::MAX;
        data.targets[0].cover = Cover::Hard;
        assert_eq!(data.total_for(&data.targets[0]), i32::MIN);
    }
}
