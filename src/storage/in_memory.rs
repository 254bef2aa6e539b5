//! In-memory item store for testing and development

use crate::core::store::ItemStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory item store
///
/// Keeps items in insertion order and hands out cloned snapshots, so a list
/// in progress never observes a concurrent insert. Uses RwLock for
/// thread-safe access.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> InMemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    /// Create a store holding the given items
    pub fn from_items(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Append an item
    pub fn insert(&self, item: T) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.push(item);

        Ok(())
    }

    /// Number of stored items
    pub fn len(&self) -> Result<usize> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

#[async_trait]
impl<T> ItemStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = InMemoryStore::new();
        store.insert("b").unwrap();
        store.insert("a").unwrap();
        store.insert("c").unwrap();

        assert_eq!(store.list().await.unwrap(), vec!["b", "a", "c"]);
        assert_eq!(store.len().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_items() {
        let store = InMemoryStore::from_items(vec![1, 2]);
        let other = store.clone();
        other.insert(3).unwrap();

        assert_eq!(store.list().await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_snapshot_is_independent() {
        let store = InMemoryStore::from_items(vec![1]);
        let snapshot = store.list().await.unwrap();
        store.insert(2).unwrap();

        assert_eq!(snapshot, vec![1]);
        assert!(!store.is_empty().unwrap());
    }
}
