//! In-memory DocumentStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use flow_engine::DocumentId;
use game_core::{Actor, ActorPatch, Item, ItemPatch};
use tokio::sync::RwLock;
use tracing::debug;

use crate::repository::{DocumentError, DocumentStore, Result};

/// In-memory implementation of DocumentStore.
///
/// Items keep their insertion order so `owned_items` is stable.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    actors: RwLock<HashMap<DocumentId, Actor>>,
    items: RwLock<Vec<Item>>,
    writes: AtomicU64,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with documents. Later duplicates win.
    pub fn with_documents(
        actors: impl IntoIterator<Item = Actor>,
        items: impl IntoIterator<Item = Item>,
    ) -> Self {
        let actors = actors
            .into_iter()
            .map(|actor| (actor.id.clone(), actor))
            .collect();
        let mut seeded: Vec<Item> = Vec::new();
        for item in items {
            match seeded.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => *existing = item,
                None => seeded.push(item),
            }
        }
        Self {
            actors: RwLock::new(actors),
            items: RwLock::new(seeded),
            writes: AtomicU64::new(0),
        }
    }

    pub async fn insert_actor(&self, actor: Actor) {
        self.actors.write().await.insert(actor.id.clone(), actor);
    }

    pub async fn insert_item(&self, item: Item) {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    /// Number of committed updates since creation.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn actor(&self, id: &DocumentId) -> Result<Actor> {
        self.actors
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DocumentError::ActorNotFound(id.clone()))
    }

    async fn item(&self, id: &DocumentId) -> Result<Item> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == *id)
            .cloned()
            .ok_or_else(|| DocumentError::ItemNotFound(id.clone()))
    }

    async fn owned_items(&self, owner: &DocumentId) -> Result<Vec<Item>> {
        if !self.actors.read().await.contains_key(owner) {
            return Err(DocumentError::ActorNotFound(owner.clone()));
        }
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|item| item.owner.as_ref() == Some(owner))
            .cloned()
            .collect())
    }

    async fn update_actor(&self, id: &DocumentId, patch: ActorPatch) -> Result<Actor> {
        let mut actors = self.actors.write().await;
        let actor = actors
            .get_mut(id)
            .ok_or_else(|| DocumentError::ActorNotFound(id.clone()))?;
        if patch.heat.is_some() && actor.heat().is_none() {
            return Err(DocumentError::WrongKind {
                id: id.clone(),
                expected: "an actor that tracks heat",
            });
        }

        patch.apply(actor);
        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(target: "runtime::documents", actor = %id, ?patch, "actor updated");
        Ok(actor.clone())
    }

    async fn update_item(&self, id: &DocumentId, patch: ItemPatch) -> Result<Item> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| DocumentError::ItemNotFound(id.clone()))?;

        patch.apply(item);
        self.writes.fetch_add(1, Ordering::Relaxed);
        debug!(target: "runtime::documents", item = %id, ?patch, "item updated");
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use flow_engine::Subject;
    use game_core::{
        ActorSystem, ItemSystem, MechSystemData, NpcData, PilotData, ResourceMeter, StatusKind,
        Uses,
    };

    use super::*;

    fn store() -> InMemoryDocumentStore {
        let npc = Actor::new(
            "npc",
            "Hornet",
            ActorSystem::Npc(NpcData {
                tier: 1,
                sys: 1,
                e_defense: 8,
                heat: ResourceMeter::new(0, 4),
            }),
        );
        let pilot = Actor::new(
            "pilot",
            "Ace",
            ActorSystem::Pilot(PilotData {
                tech_attack: 0,
                e_defense: 10,
                ll: 0,
            }),
        );
        let system = Item::new(
            "sys",
            "Scanner",
            ItemSystem::MechSystem(MechSystemData {
                uses: Some(Uses { value: 2, max: 2 }),
                ..MechSystemData::default()
            }),
        )
        .owned_by("npc");
        let status = Item::new("jam", "Jammed", ItemSystem::Status(StatusKind::Jammed));
        InMemoryDocumentStore::with_documents([npc, pilot], [system, status])
    }

    #[tokio::test]
    async fn lookups_report_missing_documents() {
        let store = store();
        assert!(store.actor(&"npc".into()).await.is_ok());
        assert_eq!(
            store.actor(&"ghost".into()).await,
            Err(DocumentError::ActorNotFound("ghost".into()))
        );
        assert_eq!(
            store.item(&"ghost".into()).await,
            Err(DocumentError::ItemNotFound("ghost".into()))
        );
    }

    #[tokio::test]
    async fn item_subject_resolves_owner() {
        let store = store();
        assert_eq!(
            store.subject_for_item(&"sys".into()).await,
            Ok(Subject::item("npc", "sys"))
        );
        assert_eq!(
            store.subject_for_item(&"jam".into()).await,
            Err(DocumentError::NoOwner("jam".into()))
        );
    }

    #[tokio::test]
    async fn updates_are_counted() {
        let store = store();
        let updated = store
            .update_item(
                &"sys".into(),
                ItemPatch {
                    uses: Some(1),
                    ..ItemPatch::default()
                },
            )
            .await
            .expect("item updated");
        assert_eq!(updated.uses(), Some(Uses { value: 1, max: 2 }));

        store
            .update_actor(&"npc".into(), ActorPatch { heat: Some(3) })
            .await
            .expect("actor updated");
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn heat_on_heatless_actor_is_rejected() {
        let store = store();
        let err = store
            .update_actor(&"pilot".into(), ActorPatch { heat: Some(1) })
            .await
            .expect_err("pilots have no heat");
        assert!(matches!(err, DocumentError::WrongKind { .. }));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn owned_items_filters_by_owner() {
        let store = store();
        let owned = store.owned_items(&"npc".into()).await.expect("owner exists");
        assert_eq!(owned.len(), 1);
        assert!(store.owned_items(&"pilot".into()).await.expect("owner exists").is_empty());
    }
}
