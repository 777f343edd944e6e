//! Plain-text output.
use game_content::WorldCatalog;
use game_core::categorize;
use runtime::{MessageEntry, MessageLevel};

/// Prints the attacker's inventory grouped by category.
///
/// Returns `false` when the actor kind has no inventory layout.
pub fn print_inventory(catalog: &WorldCatalog, actor_id: &str) -> anyhow::Result<bool> {
    let actor = catalog
        .actor(actor_id)
        .ok_or_else(|| anyhow::anyhow!("Unknown actor '{}'", actor_id))?;

    let Some(categories) = categorize(actor, &catalog.items) else {
        tracing::warn!(actor = %actor.id, kind = %actor.kind(), "no inventory layout for actor kind");
        return Ok(false);
    };

    println!("== {} ==", actor.name);
    for category in categories {
        println!("{} ({})", category.label, category.items.len());
        for item in category.items {
            let destroyed = if item.is_destroyed() { " [destroyed]" } else { "" };
            match item.uses() {
                Some(uses) => {
                    println!("  {} {}/{}{}", item.name, uses.value, uses.max, destroyed)
                }
                None => println!("  {}{}", item.name, destroyed),
            }
        }
    }
    Ok(true)
}

fn level_tag(level: MessageLevel) -> &'static str {
    match level {
        MessageLevel::Info => "info",
        MessageLevel::Warning => "warn",
        MessageLevel::Error => "error",
    }
}

pub fn print_notifications(entries: &[MessageEntry]) {
    for entry in entries {
        println!("[{}] {}", level_tag(entry.level), entry.text);
    }
}
