//! Inventory grouping for display.

use crate::actor::Actor;
use crate::item::{Item, ItemKind};

/// A labelled group of items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryCategory<'a> {
    pub label: &'static str,
    pub items: Vec<&'a Item>,
}

const MECH_CATEGORIES: [(&str, ItemKind); 5] = [
    ("Frames", ItemKind::Frame),
    ("Weapons", ItemKind::MechWeapon),
    ("Systems", ItemKind::MechSystem),
    ("Mods", ItemKind::WeaponMod),
    ("Statuses", ItemKind::Status),
];

/// Groups an actor's items into categories.
///
/// Only mechs have a defined layout; other actor kinds return `None`.
/// Items owned by someone else are skipped.
pub fn categorize<'a>(actor: &Actor, items: &'a [Item]) -> Option<Vec<InventoryCategory<'a>>> {
    if !actor.is_mech() {
        return None;
    }

    let owned: Vec<&Item> = items
        .iter()
        .filter(|item| item.owner.as_ref().is_none_or(|owner| *owner == actor.id))
        .collect();

    Some(
        MECH_CATEGORIES
            .iter()
            .map(|&(label, kind)| InventoryCategory {
                label,
                items: owned.iter().copied().filter(|item| item.kind() == kind).collect(),
            })
            .collect(),
    )
}
