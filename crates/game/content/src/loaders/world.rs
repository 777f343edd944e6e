//! World catalog loader.

use std::collections::HashSet;
use std::path::Path;

use game_core::{Actor, Item};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Actors and items making up a playable scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldCatalog {
    pub actors: Vec<Actor>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl WorldCatalog {
    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id.as_str() == id)
    }

    pub fn items_of(&self, owner: &str) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .filter(move |item| item.owner.as_ref().is_some_and(|id| id.as_str() == owner))
    }
}

/// Loader for world catalogs from RON files.
pub struct WorldLoader;

impl WorldLoader {
    /// Load a world catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<WorldCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a world catalog from RON text.
    ///
    /// Document ids must be unique across actors and items, and every item
    /// owner must name a loaded actor.
    pub fn parse(content: &str) -> LoadResult<WorldCatalog> {
        let catalog: WorldCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse world catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        let ids = catalog
            .actors
            .iter()
            .map(|actor| &actor.id)
            .chain(catalog.items.iter().map(|item| &item.id));
        for id in ids {
            if id.is_empty() {
                anyhow::bail!("World catalog contains an empty document id");
            }
            if !seen.insert(id.as_str()) {
                anyhow::bail!("Duplicate document id '{}' in world catalog", id);
            }
        }

        for item in &catalog.items {
            let Some(owner) = &item.owner else { continue };
            if catalog.actor(owner.as_str()).is_none() {
                anyhow::bail!("Item '{}' is owned by unknown actor '{}'", item.id, owner);
            }
        }

        Ok(catalog)
    }
}
