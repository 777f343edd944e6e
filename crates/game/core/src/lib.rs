//! Document model for tactical mech combat.
//!
//! `game-core` describes the documents an attack flow reads and updates
//! (actors, items, their tags and bonuses) together with the pure rules used
//! while resolving an attack: accuracy/difficulty bundles, roll formulas and
//! inventory grouping. Nothing here performs I/O; persistence and dice live in
//! the runtime.
pub mod acc_diff;
pub mod actor;
pub mod bonus;
pub mod inventory;
pub mod item;
pub mod patch;
pub mod roll;
pub mod tags;

pub use acc_diff::{AccDiffBase, AccDiffData, AccDiffTarget, AccDiffWeapon, Cover};
pub use actor::{
    Actor, ActorKind, ActorSystem, DeployableData, GOBLIN_FRAME, MechData, NpcData, PilotData,
    ResourceMeter, StatusKind, TECH_ATTACK_BONUS,
};
pub use bonus::{
    BonusContext, BonusData, BonusError, DamageTypeChecklist, RangeTypeChecklist,
    WeaponSizeChecklist, WeaponTypeChecklist, apply_tech_bonuses,
};
pub use flow_engine::DocumentId;
pub use inventory::{InventoryCategory, categorize};
pub use item::{
    ActionData, ActivationType, FrameData, Item, ItemKind, ItemSystem, MechSystemData,
    MechWeaponData, NpcFeatureData, NpcFeatureKind, NpcTechData, PilotGearData, Uses,
    WeaponModData,
};
pub use patch::{ActorPatch, ItemPatch};
pub use roll::{AttackType, CRIT_THRESHOLD, RollFormula, RollOutcome};
pub use tags::{Tag, lids};
