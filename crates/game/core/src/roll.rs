//! Attack roll formulas and their resolution.
//!
//! An attack rolls `1d20 + flat bonus`, plus the highest of `|net accuracy|`
//! d6 added (accuracy) or subtracted (difficulty).

use std::fmt;

/// Total at or above which an attack is a critical hit.
pub const CRIT_THRESHOLD: i32 = 20;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackType {
    Melee,
    Ranged,
    #[default]
    Tech,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollFormula {
    pub flat_bonus: i32,
    pub net_accuracy: i32,
}

impl RollFormula {
    pub const fn new(flat_bonus: i32, net_accuracy: i32) -> Self {
        Self {
            flat_bonus,
            net_accuracy,
        }
    }

    /// Number of d6 rolled for accuracy or difficulty.
    pub fn accuracy_dice(&self) -> usize {
        self.net_accuracy.unsigned_abs() as usize
    }
}

impl fmt::Display for RollFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1d20")?;
        if self.flat_bonus != 0 {
            write!(f, "{:+}", self.flat_bonus)?;
        }
        match self.net_accuracy {
            0 => Ok(()),
            n if n > 0 => write!(f, "+{n}d6kh1"),
            n => write!(f, "-{}d6kh1", n.unsigned_abs()),
        }
    }
}

/// A resolved attack roll.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollOutcome {
    pub formula: String,
    pub d20: u8,
    pub accuracy_dice: Vec<u8>,
    pub total: i32,
}

impl RollOutcome {
    /// Combines raw dice into a total. Only the highest d6 counts; the total
    /// saturates at the `i32` bounds.
    pub fn resolve(formula: RollFormula, d20: u8, accuracy_dice: Vec<u8>) -> Self {
        let highest = i32::from(accuracy_dice.iter().copied().max().unwrap_or(0));
        let accuracy = highest * formula.net_accuracy.signum();
        Self {
            formula: formula.to_string(),
            d20,
            accuracy_dice,
            total: i32::from(d20)
                .saturating_add(formula.flat_bonus)
                .saturating_add(accuracy),
        }
    }

    pub fn is_crit(&self) -> bool {
        self.total >= CRIT_THRESHOLD
    }

    pub fn hits(&self, defense: i32) -> bool {
        self.total >= defense
    }
}
