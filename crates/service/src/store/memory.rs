use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::ItemRepository;
use crate::errors::ServiceError;
use crate::items::{seed_items, validate_new, Item, ItemId, ItemPayload};

/// In-memory item collection.
///
/// All operations go through one `RwLock`: reads share it, and create/update/delete
/// hold the write guard across their whole scan-then-mutate step, so two concurrent
/// creates never compute the same id.
#[derive(Clone, Default)]
pub struct ItemStore {
    inner: Arc<RwLock<Vec<Item>>>,
}

impl ItemStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the two demo items.
    pub fn seeded() -> Self {
        Self::with_items(seed_items())
    }

    /// Store holding `items` as given. Callers are responsible for distinct ids.
    pub fn with_items(items: Vec<Item>) -> Self {
        Self { inner: Arc::new(RwLock::new(items)) }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

/// Highest id plus one, or 1 for an empty collection. Ids freed by deleting the
/// highest item are handed out again.
fn next_id(items: &[Item]) -> ItemId {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

#[async_trait]
impl ItemRepository for ItemStore {
    /// Snapshot of the whole collection
    async fn list(&self) -> Vec<Item> {
        self.inner.read().await.clone()
    }

    /// Linear scan by id
    async fn get(&self, id: ItemId) -> Result<Item, ServiceError> {
        let items = self.inner.read().await;
        items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Item"))
    }

    /// Validate outside the lock, then assign the id and append under it
    async fn create(&self, payload: ItemPayload) -> Result<Item, ServiceError> {
        validate_new(&payload)?;
        let mut items = self.inner.write().await;
        let item = Item::from_payload(next_id(&items), payload);
        items.push(item.clone());
        info!(id = item.id, total = items.len(), "item created");
        Ok(item)
    }

    /// Merge into the stored record; its position does not change
    async fn update(&self, id: ItemId, payload: ItemPayload) -> Result<Item, ServiceError> {
        let mut items = self.inner.write().await;
        let existing = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ServiceError::not_found("Item"))?;
        existing.merge(payload);
        debug!(id, fields = existing.fields.len(), "item updated");
        Ok(existing.clone())
    }

    /// Drop the matching record, keeping the others in order
    async fn delete(&self, id: ItemId) -> Result<(), ServiceError> {
        let mut items = self.inner.write().await;
        // deleted iff the length shrank
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() < before {
            info!(id, total = items.len(), "item deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found("Item"))
        }
    }
}
