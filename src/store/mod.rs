pub mod dynamo;
pub mod memory;

use std::sync::Arc;

use anyhow::{Result, ensure};
use async_trait::async_trait;

use crate::config::{Config, StoreBackend};
use crate::models::Item;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Key-value store holding items by `id`.
///
/// Each call is a single store operation. Implementations provide per-key
/// atomicity only; there are no multi-key transactions or conditional writes.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Write the item, replacing any existing item with the same id
    async fn put(&self, item: Item) -> Result<()>;

    /// Look up an item by id
    async fn get(&self, id: &str) -> Result<Option<Item>>;

    /// Return every stored item, in no particular order
    async fn scan_all(&self) -> Result<Vec<Item>>;

    /// Remove the item if present. Removing a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Reject keys the backing table cannot hold
pub(crate) fn validate_key(id: &str) -> Result<()> {
    ensure!(!id.is_empty(), "Item key 'id' must not be empty");
    Ok(())
}

/// Build the store selected by configuration
pub async fn from_config(config: &Config) -> Result<Arc<dyn ItemStore>> {
    let store: Arc<dyn ItemStore> = match config.store_backend {
        StoreBackend::DynamoDb => Arc::new(DynamoStore::from_config(config).await?),
        StoreBackend::Memory => {
            tracing::info!("Using in-memory item store");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}
