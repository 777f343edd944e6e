//! Concrete flows and the steps they share.

mod item;
pub mod tech;

pub use item::{
    ApplySelfHeat, CheckItemCharged, CheckItemDestroyed, CheckItemLimited, UpdateItemAfterAction,
};
pub use tech::{TechAttackCard, TechAttackData, TechAttackFlow, TechAttackOptions};
