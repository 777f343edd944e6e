//! Repository contract for the documents flows read and update.

use async_trait::async_trait;
use flow_engine::{DocumentId, Subject};
use game_core::{Actor, ActorPatch, Item, ItemPatch};

use super::error::{DocumentError, Result};

/// Store of actor and item documents.
///
/// Reads return owned snapshots; a flow never holds a reference into the
/// store across a suspension point. Updates are partial and applied
/// atomically per document; concurrent updates to the same document resolve
/// last-write-wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn actor(&self, id: &DocumentId) -> Result<Actor>;

    async fn item(&self, id: &DocumentId) -> Result<Item>;

    /// Items whose owner is `owner`, in insertion order.
    async fn owned_items(&self, owner: &DocumentId) -> Result<Vec<Item>>;

    /// Applies `patch` and returns the updated actor.
    async fn update_actor(&self, id: &DocumentId, patch: ActorPatch) -> Result<Actor>;

    /// Applies `patch` and returns the updated item.
    async fn update_item(&self, id: &DocumentId, patch: ItemPatch) -> Result<Item>;

    /// Resolves an item reference into an actor + item subject via its owner.
    async fn subject_for_item(&self, item: &DocumentId) -> Result<Subject> {
        let item = self.item(item).await?;
        match item.owner {
            Some(owner) => Ok(Subject::item(owner, item.id)),
            None => Err(DocumentError::NoOwner(item.id)),
        }
    }
}
