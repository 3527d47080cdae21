//! Resource-typed access to one collection.
//!
//! [`ResourceCollection`] is the store accessor the handler set talks to. It converts
//! between a [`Resource`] and its BSON form and keeps the identity invariant: whatever is
//! written under a key carries that key's hex form in its `id` field.
//!
//! # Example
//!
//! ```ignore
//! let responses = ResourceCollection::<_, EnrollmentResponse>::new(&backend);
//!
//! let id = ResourceId::generate();
//! responses.insert(&response.with_id(&id)).await?;
//! let loaded = responses.find_one(&id).await?;
//! ```

use std::marker::PhantomData;

use crate::{
    backend::StoreBackend,
    error::{StoreError, StoreResult},
    id::ResourceId,
    resource::{Resource, ResourceExt},
};

#[derive(Debug)]
pub struct ResourceCollection<'a, B: StoreBackend, R: Resource> {
    backend: &'a B,
    _marker: PhantomData<R>,
}

impl<'a, B: StoreBackend, R: Resource> ResourceCollection<'a, B, R> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend, _marker: PhantomData }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &'static str {
        R::collection_name()
    }

    /// Returns up to `limit` resources in store-native order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend call fails or a stored document cannot be
    /// decoded as `R`.
    pub async fn find_many(&self, limit: usize) -> StoreResult<Vec<R>> {
        self.backend
            .find_documents(limit, self.name())
            .await?
            .into_iter()
            .map(R::from_bson)
            .collect()
    }

    /// Loads the resource stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no document matches.
    pub async fn find_one(&self, id: &ResourceId) -> StoreResult<R> {
        match self.backend.find_document(id, self.name()).await? {
            Some(document) => R::from_bson(document),
            None => Err(StoreError::NotFound(id.to_hex(), self.name().to_string())),
        }
    }

    /// Inserts a resource whose id has already been assigned, returning that id. The stored
    /// copy carries the canonical lower-case form of the id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingIdentifier`] if the resource has no id, or
    /// [`StoreError::InvalidIdentifier`] if its id is not a store key.
    pub async fn insert(&self, resource: &R) -> StoreResult<ResourceId> {
        let id = resource
            .id()
            .ok_or_else(|| StoreError::MissingIdentifier(self.name().to_string()))
            .and_then(ResourceId::parse)?;

        let document = if resource.id() == Some(id.to_hex().as_str()) {
            resource.to_bson()?
        } else {
            resource.with_id(&id).to_bson()?
        };

        self.backend
            .insert_document(&id, document, self.name())
            .await?;

        Ok(id)
    }

    /// Replaces the resource stored under `id`. The stored copy carries `id` regardless of
    /// what `resource` held.
    pub async fn replace_one(&self, id: &ResourceId, resource: &R) -> StoreResult<()> {
        let document = if resource.id() == Some(id.to_hex().as_str()) {
            resource.to_bson()?
        } else {
            resource.with_id(id).to_bson()?
        };

        self.backend
            .replace_document(id, document, self.name())
            .await
    }

    /// Deletes the resource stored under `id`. Succeeds whether or not it existed.
    pub async fn delete_one(&self, id: &ResourceId) -> StoreResult<()> {
        self.backend
            .delete_document(id, self.name())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, sync::Arc};

    use async_trait::async_trait;
    use bson::Bson;
    use mea::mutex::Mutex;
    use serde_json::json;

    use super::*;
    use crate::resource::tests::{Widget, widget};

    /// Single-collection backend keyed by hex id.
    #[derive(Debug, Default, Clone)]
    struct MapBackend {
        documents: Arc<Mutex<BTreeMap<String, Bson>>>,
    }

    #[async_trait]
    impl StoreBackend for MapBackend {
        async fn find_documents(&self, limit: usize, _collection: &str) -> StoreResult<Vec<Bson>> {
            Ok(self.documents.lock().await.values().take(limit).cloned().collect())
        }

        async fn find_document(&self, id: &ResourceId, _collection: &str) -> StoreResult<Option<Bson>> {
            Ok(self.documents.lock().await.get(&id.to_hex()).cloned())
        }

        async fn insert_document(&self, id: &ResourceId, document: Bson, collection: &str) -> StoreResult<()> {
            let mut documents = self.documents.lock().await;
            if documents.contains_key(&id.to_hex()) {
                return Err(StoreError::AlreadyExists(id.to_hex(), collection.to_string()));
            }
            documents.insert(id.to_hex(), document);
            Ok(())
        }

        async fn replace_document(&self, id: &ResourceId, document: Bson, collection: &str) -> StoreResult<()> {
            let mut documents = self.documents.lock().await;
            match documents.get_mut(&id.to_hex()) {
                Some(existing) => {
                    *existing = document;
                    Ok(())
                }
                None => Err(StoreError::NotFound(id.to_hex(), collection.to_string())),
            }
        }

        async fn delete_document(&self, id: &ResourceId, _collection: &str) -> StoreResult<()> {
            self.documents.lock().await.remove(&id.to_hex());
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "map"
        }
    }

    #[tokio::test]
    async fn test_insert_then_find_one_round_trips() {
        let backend = MapBackend::default();
        let widgets = ResourceCollection::<_, Widget>::new(&backend);

        let id = ResourceId::generate();
        let original = widget(json!({ "status": "active" })).with_id(&id);

        assert_eq!(widgets.insert(&original).await.unwrap(), id);
        assert_eq!(widgets.find_one(&id).await.unwrap(), original);
    }

    #[tokio::test]
    async fn test_insert_requires_id() {
        let backend = MapBackend::default();
        let widgets = ResourceCollection::<_, Widget>::new(&backend);

        let err = widgets.insert(&widget(json!({}))).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingIdentifier(ref c) if c == "widgets"));
    }

    #[tokio::test]
    async fn test_insert_stores_canonical_id() {
        let backend = MapBackend::default();
        let widgets = ResourceCollection::<_, Widget>::new(&backend);

        let upper = "5F1B2C3D4E5F60718293A4B5";
        let id = widgets.insert(&widget(json!({ "id": upper }))).await.unwrap();
        assert_eq!(id.to_hex(), upper.to_lowercase());

        let stored = widgets.find_one(&id).await.unwrap();
        assert_eq!(stored.id(), Some(id.to_hex().as_str()));
    }

    #[tokio::test]
    async fn test_find_one_missing_is_not_found() {
        let backend = MapBackend::default();
        let widgets = ResourceCollection::<_, Widget>::new(&backend);

        let err = widgets.find_one(&ResourceId::generate()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn test_replace_forces_key_into_id() {
        let backend = MapBackend::default();
        let widgets = ResourceCollection::<_, Widget>::new(&backend);

        let id = ResourceId::generate();
        widgets.insert(&widget(json!({ "status": "draft" })).with_id(&id)).await.unwrap();

        let replacement = widget(json!({ "id": "something-else", "status": "active" }));
        widgets.replace_one(&id, &replacement).await.unwrap();

        let stored = widgets.find_one(&id).await.unwrap();
        assert_eq!(stored.id(), Some(id.to_hex().as_str()));
        assert_eq!(stored.fields["status"], json!("active"));
    }

    #[tokio::test]
    async fn test_find_many_respects_limit() {
        let backend = MapBackend::default();
        let widgets = ResourceCollection::<_, Widget>::new(&backend);

        for _ in 0..5 {
            widgets.insert(&widget(json!({})).with_id(&ResourceId::generate())).await.unwrap();
        }

        assert_eq!(widgets.find_many(3).await.unwrap().len(), 3);
        assert_eq!(widgets.find_many(100).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_delete_missing_succeeds() {
        let backend = MapBackend::default();
        let widgets = ResourceCollection::<_, Widget>::new(&backend);

        widgets.delete_one(&ResourceId::generate()).await.unwrap();
    }
}
