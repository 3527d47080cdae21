//! Storage backend abstraction for the resource store.
//!
//! This module defines the traits that abstract over different storage implementations,
//! allowing the handler set to work with any document store that can perform the five
//! collection operations below.
//!
//! # Overview
//!
//! The [`StoreBackend`] trait provides a unified async interface over one logical
//! collection at a time: a bounded find-many, find-one by id, insert, replace by id,
//! and delete by id. Each method is a single call to the underlying store with no
//! internal retry, no transaction and no ordering guarantee across concurrent calls.
//!
//! # Traits
//!
//! - [`StoreBackend`]: The core trait for storage backends
//! - [`StoreBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use enrollment_core::{backend::StoreBackend, id::ResourceId};
//! use bson::{Bson, doc};
//!
//! let backend = MyBackendImpl::new();
//!
//! let id = ResourceId::generate();
//! let document = Bson::Document(doc! { "id": id.to_hex(), "outcome": "complete" });
//! backend.insert_document(&id, document, "enrollmentresponses").await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use async_trait::async_trait;
use bson::Bson;
use std::fmt::Debug;

use crate::{error::StoreResult, id::ResourceId};

/// Abstract interface for document storage backends.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// async tasks. The store handle is created once and shared by every request.
///
/// # Error Handling
///
/// Operations return [`StoreResult<T>`](crate::error::StoreResult). Backend failures are
/// reported as [`StoreError::Backend`](crate::error::StoreError::Backend) unless a more
/// specific variant is documented on the method.
#[async_trait]
pub trait StoreBackend: Send + Sync + Debug {
    /// Returns up to `limit` documents from a collection.
    ///
    /// Documents come back in store-native order. No sort key is applied, so callers must
    /// not rely on insertion order. A collection that does not exist yields an empty vector.
    async fn find_documents(&self, limit: usize, collection: &str) -> StoreResult<Vec<Bson>>;

    /// Retrieves a single document by id.
    ///
    /// Returns `Ok(None)` when no document matches.
    async fn find_document(&self, id: &ResourceId, collection: &str) -> StoreResult<Option<Bson>>;

    /// Inserts a new document under `id`.
    ///
    /// The backend never assigns identifiers; the caller supplies one. Inserting an id that
    /// already exists fails.
    async fn insert_document(
        &self,
        id: &ResourceId,
        document: Bson,
        collection: &str,
    ) -> StoreResult<()>;

    /// Replaces the whole document stored under `id`.
    ///
    /// This is a full replace, not a partial patch. Fails with
    /// [`StoreError::NotFound`](crate::error::StoreError::NotFound) if no document matches.
    async fn replace_document(
        &self,
        id: &ResourceId,
        document: Bson,
        collection: &str,
    ) -> StoreResult<()>;

    /// Deletes the document stored under `id`.
    ///
    /// Deleting an id that does not exist succeeds; a hit and a miss are indistinguishable.
    async fn delete_document(&self, id: &ResourceId, collection: &str) -> StoreResult<()>;

    /// Returns a short name for this backend, used in logs.
    fn backend_name(&self) -> &'static str;

    /// Cleanly shuts down the backend, releasing all resources.
    ///
    /// The default implementation is a no-op, but backends with external connections
    /// should override this.
    async fn shutdown(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

#[async_trait]
pub trait StoreBackendBuilder {
    type Backend: StoreBackend;

    async fn build(self) -> StoreResult<Self::Backend>;
}
