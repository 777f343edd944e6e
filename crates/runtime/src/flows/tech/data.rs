//! Working data of a tech attack.

use flow_engine::{AppendOnly, DocumentId};
use game_core::{AccDiffData, AttackType, RollOutcome, Tag};
use serde::Serialize;

/// The roll made against one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetedRoll {
    pub target: DocumentId,
    pub name: String,
    pub roll: String,
    pub used_lock_on: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttackRolls {
    /// Formula before per-target modifiers.
    pub roll: String,
    pub targeted: AppendOnly<TargetedRoll>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitResult {
    pub target: DocumentId,
    pub name: String,
    pub total: i32,
    pub used_lock_on: bool,
    pub hit: bool,
    pub crit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DamageResult {
    pub damage_type: String,
    pub roll: String,
    pub total: i32,
}

/// State container data for [`TechAttackFlow`](super::TechAttackFlow).
///
/// Result sequences only ever grow. `acc_diff` is `None` until
/// initialization has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechAttackData {
    pub title: String,
    pub roll_str: String,
    pub flat_bonus: i32,
    pub attack_type: AttackType,
    /// Tech attacks always target e-defense.
    pub is_smart: bool,
    pub invade: bool,
    pub acc_diff: Option<AccDiffData>,
    pub attack_rolls: AttackRolls,
    pub attack_results: AppendOnly<RollOutcome>,
    pub hit_results: AppendOnly<HitResult>,
    pub damage_results: AppendOnly<DamageResult>,
    pub crit_damage_results: AppendOnly<DamageResult>,
    pub reroll_data: String,
    pub tags: Vec<Tag>,
    pub effect: Option<String>,
}

impl Default for TechAttackData {
    fn default() -> Self {
        Self {
            title: String::new(),
            roll_str: String::new(),
            flat_bonus: 0,
            attack_type: AttackType::Tech,
            is_smart: true,
            invade: false,
            acc_diff: None,
            attack_rolls: AttackRolls::default(),
            attack_results: AppendOnly::new(),
            hit_results: AppendOnly::new(),
            damage_results: AppendOnly::new(),
            crit_damage_results: AppendOnly::new(),
            reroll_data: String::new(),
            tags: Vec::new(),
            effect: None,
        }
    }
}

impl TechAttackData {
    /// Caller-supplied data merged over the defaults.
    ///
    /// Build `partial` with `..TechAttackData::default()`; fields that only
    /// make sense for tech attacks are forced.
    pub fn seeded(partial: Self) -> Self {
        Self {
            attack_type: AttackType::Tech,
            is_smart: true,
            ..partial
        }
    }
}

/// Per-run options handed to every step.
#[derive(Debug, Clone, Default)]
pub struct TechAttackOptions {
    /// Overrides the derived title.
    pub title: Option<String>,
    /// Overrides the derived flat bonus.
    pub flat_bonus: Option<i32>,
    /// Pre-built bundle; skips building one from the target selection.
    pub acc_diff: Option<AccDiffData>,
    /// Action of a mech system to use, e.g. `system.actions.0`.
    pub action_path: Option<String>,
    /// Card template; defaults to the configured tech template.
    pub template: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_forces_tech_fields() {
        let data = TechAttackData::seeded(TechAttackData {
            title: "Hack".into(),
            is_smart: false,
            attack_type: AttackType::Melee,
            ..TechAttackData::default()
        });
        assert_eq!(data.title, "Hack");
        assert!(data.is_smart);
        assert_eq!(data.attack_type, AttackType::Tech);
        assert!(data.attack_results.is_empty());
    }

    #[test]
    fn serializes_for_rendering() {
        let json = serde_json::to_value(TechAttackData::default()).expect("serializes");
        assert_eq!(json["is_smart"], true);
        assert_eq!(json["attack_type"], "Tech");
        assert_eq!(json["attack_rolls"]["targeted"], serde_json::json!([]));
    }
}
