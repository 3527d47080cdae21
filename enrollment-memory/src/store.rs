//! In-memory storage implementation for resource stores.
//!
//! This module provides a simple in-memory backend that stores documents as BSON values
//! in ordered maps behind an async-safe read-write lock.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use bson::Bson;
use mea::rwlock::RwLock;
use tracing::debug;

use enrollment_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    id::ResourceId,
};

/// hex id -> document. Ordered by key, and ObjectIds lead with their creation time, so
/// unsorted reads come back roughly in insertion order.
type CollectionMap = BTreeMap<String, Bson>;
type StoreMap = HashMap<String, CollectionMap>;

/// Thread-safe in-memory document storage backend.
///
/// # Thread Safety
///
/// `InMemoryStore` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying data.
///
/// # Example
///
/// ```ignore
/// use enrollment_memory::InMemoryStore;
/// use enrollment_core::{backend::StoreBackend, id::ResourceId};
/// use bson::{Bson, doc};
///
/// let store = InMemoryStore::new();
///
/// let id = ResourceId::generate();
/// store.insert_document(&id, Bson::Document(doc! { "id": id.to_hex() }), "enrollmentresponses").await?;
/// assert!(store.find_document(&id, "enrollmentresponses").await?.is_some());
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryStore {
    /// collection_name -> (hex id -> document)
    store: Arc<RwLock<StoreMap>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(StoreMap::new())),
        }
    }

    /// Creates a builder for constructing an `InMemoryStore`.
    pub fn builder() -> InMemoryStoreBuilder {
        InMemoryStoreBuilder::default()
    }

    /// Returns the number of documents in a collection.
    pub async fn len(&self, collection: &str) -> usize {
        self.store
            .read()
            .await
            .get(collection)
            .map_or(0, CollectionMap::len)
    }
}

#[async_trait]
impl StoreBackend for InMemoryStore {
    async fn find_documents(&self, limit: usize, collection: &str) -> StoreResult<Vec<Bson>> {
        let store = self.store.read().await;
        let collection_map = match store.get(collection) {
            Some(col) => col,
            None => return Ok(vec![]),
        };

        Ok(collection_map
            .values()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_document(&self, id: &ResourceId, collection: &str) -> StoreResult<Option<Bson>> {
        Ok(self
            .store
            .read()
            .await
            .get(collection)
            .and_then(|col| col.get(&id.to_hex()))
            .cloned())
    }

    async fn insert_document(&self, id: &ResourceId, document: Bson, collection: &str) -> StoreResult<()> {
        let mut store = self.store.write().await;
        let collection_map = store
            .entry(collection.to_string())
            .or_default();

        let key = id.to_hex();

        if collection_map.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key, collection.to_string()));
        }

        debug!(collection, id = %key, "Inserting document");
        collection_map.insert(key, document);

        Ok(())
    }

    async fn replace_document(&self, id: &ResourceId, document: Bson, collection: &str) -> StoreResult<()> {
        let mut store = self.store.write().await;
        let key = id.to_hex();

        match store.get_mut(collection).and_then(|col| col.get_mut(&key)) {
            Some(existing) => {
                debug!(collection, id = %key, "Replacing document");
                *existing = document;
                Ok(())
            }
            None => Err(StoreError::NotFound(key, collection.to_string())),
        }
    }

    async fn delete_document(&self, id: &ResourceId, collection: &str) -> StoreResult<()> {
        let mut store = self.store.write().await;

        let removed = store
            .get_mut(collection)
            .and_then(|col| col.remove(&id.to_hex()))
            .is_some();

        debug!(collection, id = %id, removed, "Deleting document");

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Builder for constructing [`InMemoryStore`] instances.
///
/// ```ignore
/// use enrollment_memory::InMemoryStore;
/// use enrollment_core::backend::StoreBackendBuilder;
///
/// let store = InMemoryStore::builder().build().await.unwrap();
/// ```
#[derive(Default)]
pub struct InMemoryStoreBuilder;

#[async_trait]
impl StoreBackendBuilder for InMemoryStoreBuilder {
    type Backend = InMemoryStore;

    /// Always succeeds and returns a freshly initialized store.
    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    const COLLECTION: &str = "enrollmentresponses";

    fn document(id: &ResourceId, outcome: &str) -> Bson {
        Bson::Document(doc! { "id": id.to_hex(), "outcome": outcome })
    }

    #[tokio::test]
    async fn test_find_documents_on_missing_collection_is_empty() {
        let store = InMemoryStore::new();
        assert!(store.find_documents(100, COLLECTION).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryStore::builder().build().await.unwrap();
        let id = ResourceId::generate();

        store.insert_document(&id, document(&id, "complete"), COLLECTION).await.unwrap();

        let found = store.find_document(&id, COLLECTION).await.unwrap().unwrap();
        assert_eq!(found, document(&id, "complete"));
        assert_eq!(store.len(COLLECTION).await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let store = InMemoryStore::new();
        let id = ResourceId::generate();

        store.insert_document(&id, document(&id, "complete"), COLLECTION).await.unwrap();
        let err = store
            .insert_document(&id, document(&id, "error"), COLLECTION)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_, _)));
    }

    #[tokio::test]
    async fn test_replace_missing_is_not_found() {
        let store = InMemoryStore::new();
        let id = ResourceId::generate();

        let err = store
            .replace_document(&id, document(&id, "complete"), COLLECTION)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn test_replace_overwrites_whole_document() {
        let store = InMemoryStore::new();
        let id = ResourceId::generate();

        store
            .insert_document(&id, Bson::Document(doc! { "id": id.to_hex(), "disposition": "x" }), COLLECTION)
            .await
            .unwrap();
        store.replace_document(&id, document(&id, "error"), COLLECTION).await.unwrap();

        let found = store.find_document(&id, COLLECTION).await.unwrap().unwrap();
        assert!(found.as_document().unwrap().get("disposition").is_none());
    }

    #[tokio::test]
    async fn test_delete_hit_and_miss_both_succeed() {
        let store = InMemoryStore::new();
        let id = ResourceId::generate();

        store.insert_document(&id, document(&id, "complete"), COLLECTION).await.unwrap();
        store.delete_document(&id, COLLECTION).await.unwrap();
        store.delete_document(&id, COLLECTION).await.unwrap();
        store.delete_document(&id, "nothing_here").await.unwrap();

        assert_eq!(store.len(COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn test_find_documents_limit_and_clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        for _ in 0..150 {
            let id = ResourceId::generate();
            clone.insert_document(&id, document(&id, "complete"), COLLECTION).await.unwrap();
        }

        assert_eq!(store.find_documents(100, COLLECTION).await.unwrap().len(), 100);
        assert_eq!(store.len(COLLECTION).await, 150);
    }
}
