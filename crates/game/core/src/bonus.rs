//! Persisted stat bonuses.
//!
//! A bonus targets a stat by `lid` and carries its value as text so it can
//! reference the owner's progression (`{ll}`, `{grit}`, `{tier}`). Checklists
//! restrict a bonus to particular weapons; an empty checklist means
//! unrestricted.
//!
//! # Application order
//!
//! For one stat, matching bonuses are applied in declaration order:
//! - `overwrite`: the bonus value becomes the new base and earlier additive
//!   bonuses are dropped
//! - `replace`: the bonus value replaces every earlier additive bonus
//! - otherwise: the value is added

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DamageTypeChecklist: u8 {
        const KINETIC   = 1 << 0;
        const ENERGY    = 1 << 1;
        const EXPLOSIVE = 1 << 2;
        const HEAT      = 1 << 3;
        const BURN      = 1 << 4;
        const VARIABLE  = 1 << 5;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct RangeTypeChecklist: u8 {
        const RANGE  = 1 << 0;
        const THREAT = 1 << 1;
        const LINE   = 1 << 2;
        const CONE   = 1 << 3;
        const BLAST  = 1 << 4;
        const BURST  = 1 << 5;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WeaponTypeChecklist: u8 {
        const RIFLE    = 1 << 0;
        const CANNON   = 1 << 1;
        const LAUNCHER = 1 << 2;
        const CQB      = 1 << 3;
        const NEXUS    = 1 << 4;
        const MELEE    = 1 << 5;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct WeaponSizeChecklist: u8 {
        const AUXILIARY  = 1 << 0;
        const MAIN       = 1 << 1;
        const HEAVY      = 1 << 2;
        const SUPERHEAVY = 1 << 3;
    }
}

/// Errors raised while resolving a bonus value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BonusError {
    #[error("bonus `{lid}` has a non-numeric value `{val}`")]
    InvalidValue { lid: String, val: String },
}

/// Owner progression referenced by bonus values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BonusContext {
    /// License level.
    pub ll: u8,
    pub grit: i32,
    pub tier: u8,
}

/// A single persisted bonus.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BonusData {
    pub lid: String,
    pub val: String,
    pub damage_types: DamageTypeChecklist,
    pub range_types: RangeTypeChecklist,
    pub weapon_types: WeaponTypeChecklist,
    pub weapon_sizes: WeaponSizeChecklist,
    pub overwrite: bool,
    pub replace: bool,
}

impl Default for BonusData {
    fn default() -> Self {
        Self {
            lid: String::new(),
            val: "0".to_string(),
            damage_types: DamageTypeChecklist::empty(),
            range_types: RangeTypeChecklist::empty(),
            weapon_types: WeaponTypeChecklist::empty(),
            weapon_sizes: WeaponSizeChecklist::empty(),
            overwrite: false,
            replace: false,
        }
    }
}

impl BonusData {
    pub fn new(lid: impl Into<String>, val: impl Into<String>) -> Self {
        Self {
            lid: lid.into(),
            val: val.into(),
            ..Self::default()
        }
    }

    /// Tech attacks have no weapon profile, so only unrestricted bonuses
    /// apply to them.
    pub fn applies_to_tech(&self) -> bool {
        self.damage_types.is_empty()
            && self.range_types.is_empty()
            && self.weapon_types.is_empty()
            && self.weapon_sizes.is_empty()
    }

    /// Resolves placeholders and sums the signed integer terms of `val`.
    ///
    /// `"1"`, `"-2"`, `"{grit}"`, and `"1 + {ll}"` are all valid.
    pub fn value(&self, ctx: &BonusContext) -> Result<i32, BonusError> {
        let resolved = self
            .val
            .replace("{ll}", &ctx.ll.to_string())
            .replace("{grit}", &ctx.grit.to_string())
            .replace("{tier}", &ctx.tier.to_string());

        sum_terms(&resolved).ok_or_else(|| BonusError::InvalidValue {
            lid: self.lid.clone(),
            val: self.val.clone(),
        })
    }
}

/// Applies every bonus for `lid` that is relevant to tech attacks on top of
/// `base`.
pub fn apply_tech_bonuses(
    base: i32,
    bonuses: &[BonusData],
    lid: &str,
    ctx: &BonusContext,
) -> Result<i32, BonusError> {
    let mut base = base;
    let mut extra = 0;
    for bonus in bonuses
        .iter()
        .filter(|bonus| bonus.lid == lid && bonus.applies_to_tech())
    {
        let value = bonus.value(ctx)?;
        if bonus.overwrite {
            base = value;
            extra = 0;
        } else if bonus.replace {
            extra = value;
        } else {
            extra = extra.saturating_add(value);
        }
    }
    Ok(base.saturating_add(extra))
}

fn sum_terms(expr: &str) -> Option<i32> {
    let compact: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let mut total = 0i32;
    let mut term = String::new();
    let mut sign = 1;
    for (i, c) in compact.char_indices() {
        match c {
            '+' | '-' => {
                if !term.is_empty() {
                    total = total.checked_add(sign * term.parse::<i32>().ok()?)?;
                    term.clear();
                } else if i != 0 {
                    // Two operators in a row.
                    return None;
                }
                sign = if c == '-' { -1 } else { 1 };
            }
            digit if digit.is_ascii_digit() => term.push(digit),
            _ => return None,
        }
    }
    if term.is_empty() {
        return None;
    }
    total.checked_add(sign * term.parse::<i32>().ok()?)
}
