//! In-memory storage backend for the enrollment resource service.
//!
//! This crate provides a thread-safe, in-memory implementation of the `StoreBackend` trait.
//! It uses async-aware read-write locks for concurrent access and is meant for development,
//! testing, and single-process deployments.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads and writes using async-aware RwLock
//! - **Shared state** - Clones share the same underlying collections
//! - **Type-erased storage** - Documents are kept as BSON, keyed by their hex id
//!
//! # Quick Start
//!
//! ```ignore
//! use enrollment_core::{backend::StoreBackendBuilder, collection::ResourceCollection};
//! use enrollment_memory::InMemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryStore::builder().build().await?;
//!     let responses = ResourceCollection::<_, EnrollmentResponse>::new(&backend);
//!
//!     let found = responses.find_many(100).await?;
//!     assert!(found.is_empty());
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as enrollment_memory;

pub mod store;

pub use store::{InMemoryStore, InMemoryStoreBuilder};
