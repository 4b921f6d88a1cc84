use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use super::{ItemStore, validate_key};
use crate::models::Item;

/// Process-local store for development and tests. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: DashMap<String, Item>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn put(&self, item: Item) -> Result<()> {
        validate_key(&item.id)?;
        tracing::debug!("Put item with id: {}", item.id);
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        validate_key(id)?;
        Ok(self.items.get(id).map(|entry| entry.value().clone()))
    }

    async fn scan_all(&self) -> Result<Vec<Item>> {
        let items: Vec<Item> = self
            .items
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        tracing::debug!("Scanned {} items", items.len());
        Ok(items)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        validate_key(id)?;
        if self.items.remove(id).is_some() {
            tracing::debug!("Deleted item with id: {}", id);
        }
        Ok(())
    }
}
