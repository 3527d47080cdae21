use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection as MongoCollection,
    error::{Error as MongoError, ErrorKind, WriteFailure},
    options::{ClientOptions, FindOptions},
};
use tracing::debug;

use enrollment_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    id::ResourceId,
};

use crate::sanitizer::ValueSanitizer;

const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::new(dsn, database)
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(&ValueSanitizer::sanitize_string(collection_name))
    }

    /// Moves the resource id into `_id` and escapes field names. A body `_id` never
    /// replaces the store key.
    fn prepare_document(&self, id: &ResourceId, document: &Bson) -> StoreResult<Document> {
        let fields = document
            .as_document()
            .ok_or_else(|| StoreError::Serialization("Expected document".into()))?;

        let mut prepared = doc! { "_id": id.to_hex() };
        for (key, value) in ValueSanitizer::sanitize_document(fields) {
            if key != "id" && key != "_id" {
                prepared.insert(key, value);
            }
        }

        Ok(prepared)
    }

    /// Inverse of `prepare_document`: `_id` becomes the hex `id` field again.
    fn restore_document(&self, mut document: Document) -> Bson {
        let mut restored = Document::new();

        match document.remove("_id") {
            Some(Bson::ObjectId(oid)) => {
                restored.insert("id", oid.to_hex());
            }
            Some(id) => {
                restored.insert("id", id);
            }
            None => {}
        }

        for (key, value) in ValueSanitizer::restore_document(&document) {
            restored.insert(key, value);
        }

        Bson::Document(restored)
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.client.shutdown().await;

        Ok(())
    }
}

fn backend_error(err: MongoError) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn find_documents(&self, limit: usize, collection: &str) -> StoreResult<Vec<Bson>> {
        let mut options = FindOptions::default();
        options.limit = Some(limit as i64);

        Ok(
            self.get_collection(collection)
                .find(doc! {})
                .with_options(options)
                .await
                .map_err(backend_error)?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(backend_error)?
                .into_iter()
                .map(|doc| self.restore_document(doc))
                .collect()
        )
    }

    async fn find_document(&self, id: &ResourceId, collection: &str) -> StoreResult<Option<Bson>> {
        Ok(
            self.get_collection(collection)
                .find_one(doc! { "_id": id.to_hex() })
                .await
                .map_err(backend_error)?
                .map(|doc| self.restore_document(doc))
        )
    }

    async fn insert_document(&self, id: &ResourceId, document: Bson, collection: &str) -> StoreResult<()> {
        self.get_collection(collection)
            .insert_one(self.prepare_document(id, &document)?)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    StoreError::AlreadyExists(id.to_hex(), collection.to_string())
                } else {
                    backend_error(e)
                }
            })?;

        Ok(())
    }

    async fn replace_document(&self, id: &ResourceId, document: Bson, collection: &str) -> StoreResult<()> {
        let result = self
            .get_collection(collection)
            .replace_one(
                doc! { "_id": id.to_hex() },
                self.prepare_document(id, &document)?,
            )
            .await
            .map_err(backend_error)?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_hex(), collection.to_string()));
        }

        Ok(())
    }

    async fn delete_document(&self, id: &ResourceId, collection: &str) -> StoreResult<()> {
        let result = self
            .get_collection(collection)
            .delete_one(doc! { "_id": id.to_hex() })
            .await
            .map_err(backend_error)?;

        debug!(collection, id = %id, deleted = result.deleted_count, "Deleted document");

        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn shutdown(self) -> StoreResult<()> {
        self.shutdown().await
    }
}

pub struct MongoDbStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoDbStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MongoDbStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| StoreError::Initialization(e.to_string()))?,
            )
            .map_err(|e| StoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Client construction does not connect, so document mapping can be tested offline.
    async fn store() -> MongoDbStore {
        MongoDbStore::builder("mongodb://localhost:27017", "fhir")
            .build()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_prepare_moves_id_into_underscore_id() {
        let store = store().await;
        let id = ResourceId::generate();

        let prepared = store
            .prepare_document(&id, &Bson::Document(doc! { "id": "stale", "outcome": "complete" }))
            .unwrap();

        assert_eq!(prepared.get_str("_id").unwrap(), id.to_hex());
        assert!(!prepared.contains_key("id"));
        assert_eq!(prepared.get_str("outcome").unwrap(), "complete");
    }

    #[tokio::test]
    async fn test_prepare_ignores_body_underscore_id() {
        let store = store().await;
        let id = ResourceId::generate();

        let prepared = store
            .prepare_document(&id, &Bson::Document(doc! { "id": id.to_hex(), "_id": "other" }))
            .unwrap();

        assert_eq!(prepared.get_str("_id").unwrap(), id.to_hex());
        assert_eq!(prepared.len(), 1);

        let restored = store.restore_document(prepared);
        assert_eq!(restored.as_document().unwrap().get_str("id").unwrap(), id.to_hex());
    }

    #[tokio::test]
    async fn test_prepare_rejects_non_documents() {
        let store = store().await;
        let err = store
            .prepare_document(&ResourceId::generate(), &Bson::String("x".into()))
            .unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_restore_inverts_prepare() {
        let store = store().await;
        let id = ResourceId::generate();
        let original = Bson::Document(doc! { "id": id.to_hex(), "a.b": { "$c": 1 } });

        let restored = store.restore_document(store.prepare_document(&id, &original).unwrap());
        assert_eq!(restored, original);
    }

    #[tokio::test]
    async fn test_restore_renders_object_ids_as_hex() {
        let store = store().await;
        let id = ResourceId::generate();

        let restored = store.restore_document(doc! { "_id": *id.as_object_id() });
        assert_eq!(restored.as_document().unwrap().get_str("id").unwrap(), id.to_hex());
    }
}
