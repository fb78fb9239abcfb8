//! Storage seam for items.
//!
//! Handlers only see `ItemRepository`; `memory::ItemStore` is the process-lifetime
//! implementation wired in at startup.

pub mod memory;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::items::{Item, ItemId, ItemPayload};

pub use memory::ItemStore;

/// CRUD over the ordered item collection.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Every item, in insertion order.
    async fn list(&self) -> Vec<Item>;
    async fn get(&self, id: ItemId) -> Result<Item, ServiceError>;
    /// Validate, assign the next id and append.
    async fn create(&self, payload: ItemPayload) -> Result<Item, ServiceError>;
    /// Merge `payload` into the stored item, in place.
    async fn update(&self, id: ItemId, payload: ItemPayload) -> Result<Item, ServiceError>;
    async fn delete(&self, id: ItemId) -> Result<(), ServiceError>;
}
